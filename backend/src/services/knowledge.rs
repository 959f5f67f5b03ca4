use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use festbot_models::KnowledgeMatch;
use pgvector::Vector;
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;

/// A rough characters-per-token estimate for budgeting context.
const CHARS_PER_TOKEN: usize = 4;

/// Text embedding provider. Trait-object so tests can stub it and so
/// the retriever does not care which hosted API is behind it.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
    fn dimension(&self) -> usize;
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

/// Embedder backed by the hosted Gemini `embedContent` endpoint.
pub struct HttpEmbedder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    dimension: usize,
}

impl HttpEmbedder {
    pub fn new(base_url: String, api_key: String, model: String, dimension: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            model,
            dimension,
        }
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!(
            "{}/models/{}:embedContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = serde_json::json!({
            "model": format!("models/{}", self.model),
            "content": { "parts": [{ "text": text }] },
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to call embedding service")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Embedding service returned status {}",
                response.status()
            ));
        }

        let parsed: EmbedContentResponse = response
            .json()
            .await
            .context("Failed to parse embedding response")?;

        if parsed.embedding.values.len() != self.dimension {
            return Err(anyhow!(
                "Embedding dimension mismatch: expected {}, got {}",
                self.dimension,
                parsed.embedding.values.len()
            ));
        }

        Ok(parsed.embedding.values)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// FAQ-style retrieval over the vector-indexed `knowledge_base` table.
///
/// Both remote hops (embedding API, nearest-neighbor stored function)
/// fail open: any error is logged and surfaced as "nothing found".
/// Callers cannot tell a lookup failure from an empty knowledge base,
/// on purpose — FAQ enrichment is a nice-to-have.
pub struct KnowledgeRetriever {
    pool: PgPool,
    embedder: Option<Arc<dyn Embedder>>,
    match_count: i32,
    match_threshold: f64,
}

impl KnowledgeRetriever {
    pub fn new(
        pool: PgPool,
        embedder: Option<Arc<dyn Embedder>>,
        match_count: i32,
        match_threshold: f64,
    ) -> Self {
        Self {
            pool,
            embedder,
            match_count,
            match_threshold,
        }
    }

    /// Embed the query and run cosine nearest-neighbor search, best
    /// matches first. Empty on any failure.
    pub async fn search(&self, query: &str) -> Vec<KnowledgeMatch> {
        match self.try_search(query).await {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("Knowledge lookup failed, treating as no results: {:#}", e);
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<KnowledgeMatch>> {
        let embedder = self
            .embedder
            .as_ref()
            .ok_or_else(|| anyhow!("No embedder configured"))?;

        let embedding = embedder.embed(query).await?;

        let matches = sqlx::query_as::<_, KnowledgeMatch>(
            "SELECT content, similarity, metadata FROM match_knowledge_base($1, $2, $3)",
        )
        .bind(Vector::from(embedding))
        .bind(self.match_threshold)
        .bind(self.match_count)
        .fetch_all(&self.pool)
        .await
        .context("Knowledge base similarity search failed")?;

        Ok(matches)
    }

    /// Concatenated passage context for a query, capped at
    /// `max_tokens`. Empty string when nothing (or nothing affordable)
    /// was found.
    pub async fn get_context(&self, query: &str, max_tokens: usize) -> String {
        let matches = self.search(query).await;
        build_context(&matches, max_tokens)
    }
}

/// Pack ranked passages into a token budget. A passage that would
/// blow the budget is dropped, not truncated; later, cheaper passages
/// may still fit.
pub fn build_context(matches: &[KnowledgeMatch], max_tokens: usize) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let mut spent = 0usize;

    for m in matches {
        let cost = m.content.len() / CHARS_PER_TOKEN;
        if spent + cost > max_tokens {
            continue;
        }
        spent += cost;
        parts.push(&m.content);
    }

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(content: &str, similarity: f64) -> KnowledgeMatch {
        KnowledgeMatch {
            content: content.to_string(),
            similarity,
            metadata: serde_json::Value::Null,
        }
    }

    #[test]
    fn context_respects_the_budget() {
        // 40 chars ≈ 10 tokens each
        let matches = vec![
            entry(&"a".repeat(40), 0.9),
            entry(&"b".repeat(40), 0.8),
            entry(&"c".repeat(40), 0.7),
        ];
        let context = build_context(&matches, 20);
        assert!(context.contains('a'));
        assert!(context.contains('b'));
        assert!(!context.contains('c'));
    }

    #[test]
    fn oversized_passage_is_dropped_not_truncated() {
        let matches = vec![
            entry(&"x".repeat(400), 0.9), // ≈100 tokens, over budget
            entry(&"y".repeat(40), 0.8),  // ≈10 tokens, fits
        ];
        let context = build_context(&matches, 20);
        assert!(!context.contains('x'));
        assert_eq!(context, "y".repeat(40));
    }

    #[test]
    fn empty_matches_give_empty_context() {
        assert_eq!(build_context(&[], 100), "");
    }
}
