use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row returned by the `match_knowledge_base` stored function:
/// a supporting passage with its cosine similarity to the query.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KnowledgeMatch {
    pub content: String,
    pub similarity: f64,
    pub metadata: serde_json::Value,
}
