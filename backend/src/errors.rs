use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use festbot_models::ChatResponse;
use thiserror::Error;

/// Chat request failure taxonomy.
///
/// Knowledge-retrieval failures never show up here: the retriever
/// absorbs them and reports "nothing found". Event-search failures do,
/// because the handler cannot guess at a fallback event.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("rate limit exceeded for session")]
    RateLimited,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ResponseError for ChatError {
    fn status_code(&self) -> StatusCode {
        match self {
            ChatError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ChatError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // The user always gets a sentence, never a raw error.
        let message = match self {
            ChatError::RateLimited => "You're typing too fast! Give me a minute.",
            ChatError::Internal(_) => {
                "I'm having trouble accessing the schedule right now. Please try again."
            }
        };
        HttpResponse::build(self.status_code()).json(ChatResponse {
            response: message.to_string(),
        })
    }
}
