use std::env;

/// Runtime configuration, loaded once at startup from the environment.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Server
    pub backend_port: u16,
    pub env_mode: String,
    pub cors_origin: String,

    // Database
    pub database_url: String,

    // Embedding service (knowledge-base retrieval)
    pub embedding_api_url: String,
    pub embedding_api_key: Option<String>,
    pub embedding_model: String,
    pub embedding_dimension: usize,

    // Knowledge retrieval tunables
    pub knowledge_match_count: i32,
    pub knowledge_match_threshold: f64,
    pub knowledge_context_tokens: usize,

    // Event matcher tunable
    pub match_threshold: f64,

    // Rate limiting (per session, fixed window)
    pub rate_limit_messages: u32,
    pub rate_limit_window_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            // Server
            backend_port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .expect("BACKEND_PORT must be a valid port number"),
            env_mode: env::var("ENV_MODE").unwrap_or_else(|_| "development".to_string()),
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            // Database
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),

            // Embedding service
            embedding_api_url: env::var("EMBEDDING_API_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }),
            embedding_api_key: env::var("EMBEDDING_API_KEY").ok(),
            embedding_model: env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "text-embedding-004".to_string()),
            embedding_dimension: env::var("EMBEDDING_DIMENSION")
                .unwrap_or_else(|_| "768".to_string())
                .parse()
                .unwrap_or(768),

            // Knowledge retrieval
            knowledge_match_count: env::var("KNOWLEDGE_MATCH_COUNT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            knowledge_match_threshold: env::var("KNOWLEDGE_MATCH_THRESHOLD")
                .unwrap_or_else(|_| "0.5".to_string())
                .parse()
                .unwrap_or(0.5),
            knowledge_context_tokens: env::var("KNOWLEDGE_CONTEXT_TOKENS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .unwrap_or(500),

            // Event matcher
            match_threshold: env::var("MATCH_THRESHOLD")
                .unwrap_or_else(|_| "0.55".to_string())
                .parse()
                .unwrap_or(0.55),

            // Rate limiting
            rate_limit_messages: env::var("RATE_LIMIT_MESSAGES")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .unwrap_or(8),
            rate_limit_window_secs: env::var("RATE_LIMIT_WINDOW_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
        }
    }
}
