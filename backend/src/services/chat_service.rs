use std::sync::Arc;

use anyhow::Result;
use festbot_models::Intent;

use crate::errors::ChatError;
use crate::services::analyzer::analyze;
use crate::services::formatter::format_reply;
use crate::services::knowledge::KnowledgeRetriever;
use crate::services::matcher::find_event_match;
use crate::services::rate_limiter::SessionRateLimiter;
use crate::services::repository::{EventStore, QueryLogStore};

/// Reply for an empty message; processing stops immediately.
pub const EMPTY_PROMPT: &str =
    "Say something! Ask me about any event, like \"when is Robowars\".";

/// Reply when no event matches the query.
pub const NOT_FOUND_REPLY: &str = "I couldn't find an event with that name. \
     Try asking about \"Robowars\" or \"Hackathon\", or check the events page!";

/// Canned general-info reply when the knowledge base has nothing.
pub const GENERAL_INFO_FALLBACK: &str = "Campus facilities (wifi, food stalls, parking, \
     washrooms) are open throughout the fest. The help desk near the main gate can point \
     you anywhere!";

/// Sentinel marker logged as the query text on an unhandled error.
const ERROR_TRACE: &str = "ERROR_TRACE";

/// The per-request chat pipeline: rate limit, log, resolve an event,
/// format a reply. Stateless across requests except for the rate
/// limiter's counters.
pub struct ChatService {
    events: Arc<dyn EventStore>,
    logs: Arc<dyn QueryLogStore>,
    knowledge: KnowledgeRetriever,
    limiter: SessionRateLimiter,
    match_threshold: f64,
    context_tokens: usize,
}

impl ChatService {
    pub fn new(
        events: Arc<dyn EventStore>,
        logs: Arc<dyn QueryLogStore>,
        knowledge: KnowledgeRetriever,
        limiter: SessionRateLimiter,
        match_threshold: f64,
        context_tokens: usize,
    ) -> Self {
        Self {
            events,
            logs,
            knowledge,
            limiter,
            match_threshold,
            context_tokens,
        }
    }

    /// Handle one chat message.
    ///
    /// Order is load-bearing: the empty-input check and the rate-limit
    /// check run before any database access, and neither writes a log
    /// row. Everything past the limiter logs exactly one incoming row,
    /// and the row is guaranteed written before this returns.
    pub async fn handle(&self, message: &str, session_id: &str) -> Result<String, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Ok(EMPTY_PROMPT.to_string());
        }

        let decision = self.limiter.check(session_id);
        if !decision.allowed {
            log::warn!("Rate limit hit for session {}", session_id);
            return Err(ChatError::RateLimited);
        }

        match self.process(message, session_id).await {
            Ok(reply) => Ok(reply),
            Err(e) => Err(self.report_error(session_id, e).await),
        }
    }

    /// Record an ERROR_TRACE log row for a failed request and wrap the
    /// cause for the 500 response. Also the landing spot for failures
    /// that happen before the pipeline runs, like an unreadable body.
    pub async fn report_error(&self, session_id: &str, error: anyhow::Error) -> ChatError {
        log::error!("Chat pipeline failed for session {}: {:#}", session_id, error);
        // Best-effort error trace; the 500 goes out either way.
        if let Err(log_err) = self
            .logs
            .log(session_id, ERROR_TRACE, None, Some(&error.to_string()))
            .await
        {
            log::error!("Failed to write error trace: {:#}", log_err);
        }
        ChatError::Internal(error)
    }

    async fn process(&self, message: &str, session_id: &str) -> Result<String> {
        let analysis = analyze(message);
        log::info!(
            "Chat query from {}: {:?} ({})",
            session_id,
            analysis.intent,
            message
        );

        // The incoming log is fired concurrently with the first lookup
        // and joined before any reply is produced.
        let incoming_log = self
            .logs
            .log(session_id, message, Some(analysis.intent.as_str()), None);

        if analysis.intent == Intent::GeneralInfo {
            let context = self.knowledge.get_context(message, self.context_tokens);
            let (log_result, context) = futures::join!(incoming_log, context);
            log_result?;

            if context.is_empty() {
                return Ok(GENERAL_INFO_FALLBACK.to_string());
            }
            return Ok(format!("Here's what I found:\n\n{}", context));
        }

        let search = self.events.search_fuzzy(message);
        let (log_result, hits) = futures::join!(incoming_log, search);
        log_result?;
        let hits = hits?;

        // First row from the stored function is the best match. When
        // it comes back empty, take a second shot with the in-process
        // matcher over the known names before giving up.
        let event = match hits.first() {
            Some(summary) => self.events.find_by_id(summary.id).await?,
            None => {
                let names = self.events.list_names().await?;
                match find_event_match(message, &names, self.match_threshold) {
                    Some(name) => self.events.find_by_name(name).await?,
                    None => None,
                }
            }
        };

        match event {
            Some(event) => {
                let reply = format_reply(&event, message);
                self.logs
                    .log(
                        session_id,
                        message,
                        Some(analysis.intent.as_str()),
                        Some(&event.name),
                    )
                    .await?;
                Ok(reply)
            }
            None => Ok(NOT_FOUND_REPLY.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{
        hackathon, lazy_pool, robowars, RecordingLogStore, StubEventStore,
    };
    use std::time::Duration;

    fn service_with(
        store: StubEventStore,
        max_messages: u32,
    ) -> (ChatService, Arc<RecordingLogStore>) {
        let logs = Arc::new(RecordingLogStore::default());
        let knowledge = KnowledgeRetriever::new(lazy_pool(), None, 5, 0.5);
        let service = ChatService::new(
            Arc::new(store),
            logs.clone(),
            knowledge,
            SessionRateLimiter::new(max_messages, Duration::from_secs(60)),
            0.55,
            500,
        );
        (service, logs)
    }

    #[actix_web::test]
    async fn matched_query_writes_two_log_rows() {
        let (service, logs) =
            service_with(StubEventStore::with_events(vec![robowars()]), 10);

        let reply = service.handle("when is Robowars", "sess-1").await.unwrap();

        assert!(reply.contains("Robowars"));
        assert!(reply.contains("Mar 4, 2026"));
        let rows = logs.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].query_text, "when is Robowars");
        assert_eq!(rows[0].source, None);
        assert_eq!(rows[1].source, Some("Robowars".to_string()));
    }

    #[actix_web::test]
    async fn miss_falls_back_and_logs_once() {
        let (service, logs) =
            service_with(StubEventStore::with_events(vec![robowars()]), 10);

        let reply = service
            .handle("tell me about the cooking contest", "sess-1")
            .await
            .unwrap();

        assert_eq!(reply, NOT_FOUND_REPLY);
        assert_eq!(logs.rows().len(), 1);
    }

    #[actix_web::test]
    async fn empty_message_short_circuits_without_logging() {
        let (service, logs) = service_with(StubEventStore::with_events(vec![]), 10);

        let reply = service.handle("   ", "sess-1").await.unwrap();

        assert_eq!(reply, EMPTY_PROMPT);
        assert!(logs.rows().is_empty());
    }

    #[actix_web::test]
    async fn rate_limited_session_gets_429_and_no_log_row() {
        let (service, logs) =
            service_with(StubEventStore::with_events(vec![robowars()]), 1);

        service.handle("when is Robowars", "sess-1").await.unwrap();
        let err = service.handle("when is Robowars", "sess-1").await.unwrap_err();

        assert!(matches!(err, ChatError::RateLimited));
        // Only the first request made it past the limiter.
        assert_eq!(logs.rows().len(), 2);
        assert!(logs.rows().iter().all(|r| r.query_text != "ERROR_TRACE"));
    }

    #[actix_web::test]
    async fn search_failure_writes_error_trace_row() {
        let mut store = StubEventStore::with_events(vec![robowars()]);
        store.fail_search = true;
        let (service, logs) = service_with(store, 10);

        let err = service.handle("when is Robowars", "sess-1").await.unwrap_err();

        assert!(matches!(err, ChatError::Internal(_)));
        let rows = logs.rows();
        let trace = rows.iter().find(|r| r.query_text == "ERROR_TRACE");
        assert!(trace.is_some());
        assert_eq!(trace.unwrap().session_id, "sess-1");
    }

    #[actix_web::test]
    async fn second_chance_matcher_resolves_inflected_name() {
        // Substring search can't bridge "hackathon" -> "Hackathon 2026";
        // the name-list matcher picks it up.
        let (service, logs) =
            service_with(StubEventStore::with_events(vec![hackathon(), robowars()]), 10);

        let reply = service
            .handle("rules for hackathon", "sess-1")
            .await
            .unwrap();

        assert!(reply.contains("Hackathon 2026"));
        let rows = logs.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].source, Some("Hackathon 2026".to_string()));
    }
}
