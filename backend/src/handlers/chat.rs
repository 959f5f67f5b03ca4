use actix_web::{web, HttpResponse};
use anyhow::Context;
use festbot_models::{ChatRequest, ChatResponse};

use crate::errors::ChatError;
use crate::state::AppState;

/// Session id used when the client did not send one. Not rejected;
/// the value only keys rate limiting and log correlation.
const UNKNOWN_SESSION: &str = "unknown";

/// `POST /api/chat`
///
/// The body is read raw and parsed here rather than through the Json
/// extractor: an unreadable payload is a pipeline failure like any
/// other and must leave the same error trace in the query log before
/// the apology goes out.
pub async fn chat(
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ChatError> {
    let request: ChatRequest = match serde_json::from_slice(&body)
        .context("Failed to parse chat request body")
    {
        Ok(request) => request,
        Err(e) => return Err(state.chat_service.report_error(UNKNOWN_SESSION, e).await),
    };

    let message = request.message.unwrap_or_default();
    let session_id = request
        .session_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_SESSION.to_string());

    let reply = state.chat_service.handle(&message, &session_id).await?;

    Ok(HttpResponse::Ok().json(ChatResponse { response: reply }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/chat", web::post().to(chat));
}
