use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::services::chat_service::ChatService;
use crate::services::knowledge::{Embedder, HttpEmbedder, KnowledgeRetriever};
use crate::services::rate_limiter::SessionRateLimiter;
use crate::services::repository::{EventRepository, QueryLogRepository};

/// Process-wide state: one pool, one client per collaborator,
/// constructed once at startup and injected into the handlers.
pub struct AppState {
    pub db_pool: PgPool,
    pub events: EventRepository,
    pub chat_service: Arc<ChatService>,
}

impl AppState {
    pub fn new(db_pool: PgPool, config: AppConfig) -> Self {
        let events = EventRepository::new(db_pool.clone());
        let logs = QueryLogRepository::new(db_pool.clone());

        // Knowledge retrieval degrades to "nothing found" when no API
        // key is configured; the event pipeline does not depend on it.
        let embedder: Option<Arc<dyn Embedder>> = match &config.embedding_api_key {
            Some(key) => Some(Arc::new(HttpEmbedder::new(
                config.embedding_api_url.clone(),
                key.clone(),
                config.embedding_model.clone(),
                config.embedding_dimension,
            ))),
            None => {
                log::warn!("EMBEDDING_API_KEY not set; knowledge-base answers disabled");
                None
            }
        };

        let knowledge = KnowledgeRetriever::new(
            db_pool.clone(),
            embedder,
            config.knowledge_match_count,
            config.knowledge_match_threshold,
        );

        let limiter = SessionRateLimiter::new(
            config.rate_limit_messages,
            Duration::from_secs(config.rate_limit_window_secs),
        );

        let chat_service = Arc::new(ChatService::new(
            Arc::new(events.clone()),
            Arc::new(logs),
            knowledge,
            limiter,
            config.match_threshold,
            config.knowledge_context_tokens,
        ));

        Self {
            db_pool,
            events,
            chat_service,
        }
    }
}
