use anyhow::{Context, Result};
use async_trait::async_trait;
use festbot_models::{Event, EventListing, EventSummary};
use sqlx::PgPool;
use uuid::Uuid;

/// Read side of the event store as the chat pipeline sees it.
/// Trait-object so tests can stub it, same shape as `Embedder`.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn search_fuzzy(&self, query: &str) -> Result<Vec<EventSummary>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Event>>;
    async fn list_names(&self) -> Result<Vec<String>>;
}

/// Append-only query-log writer as the chat pipeline sees it.
#[async_trait]
pub trait QueryLogStore: Send + Sync {
    async fn log(
        &self,
        session_id: &str,
        query_text: &str,
        intent: Option<&str>,
        source: Option<&str>,
    ) -> Result<()>;
}

/// Read-only access to the `events` table.
///
/// Fuzzy search is delegated to the database-side `search_events_fuzzy`
/// stored function (pg_trgm) so the handlers stay out of the ranking
/// business; it returns minimal rows and the full record is fetched in
/// a second round trip on a hit.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listing rows for the events page: no descriptions, no
    /// registration window, just what the cards show.
    pub async fn list_events(&self) -> Result<Vec<EventListing>> {
        let events = sqlx::query_as::<_, EventListing>(
            r#"SELECT id, name, category, starts_at, registration_open
               FROM events ORDER BY starts_at NULLS LAST, name"#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list events")?;

        Ok(events)
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn search_fuzzy(&self, query: &str) -> Result<Vec<EventSummary>> {
        let rows = sqlx::query_as::<_, EventSummary>(
            "SELECT id, name FROM search_events_fuzzy($1)",
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await
        .context("Fuzzy event search failed")?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"SELECT id, name, category, description, long_description, venue,
                      starts_at, ends_at, registration_starts_at, registration_ends_at,
                      prize_pool, team_size_min, team_size_max, registration_open
               FROM events WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch event by id")?;

        Ok(event)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"SELECT id, name, category, description, long_description, venue,
                      starts_at, ends_at, registration_starts_at, registration_ends_at,
                      prize_pool, team_size_min, team_size_max, registration_open
               FROM events WHERE name = $1"#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch event by name")?;

        Ok(event)
    }

    /// All event names, in stable name order. Feeds the in-process
    /// fuzzy matcher.
    async fn list_names(&self) -> Result<Vec<String>> {
        let names: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM events ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .context("Failed to list event names")?;

        Ok(names.into_iter().map(|(name,)| name).collect())
    }
}

/// Append-only writer for the `query_logs` observability table.
/// Rows are never updated or deleted here; retention is someone
/// else's problem.
#[derive(Clone)]
pub struct QueryLogRepository {
    pool: PgPool,
}

impl QueryLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryLogStore for QueryLogRepository {
    async fn log(
        &self,
        session_id: &str,
        query_text: &str,
        intent: Option<&str>,
        source: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO query_logs (session_id, query_text, intent, source) VALUES ($1, $2, $3, $4)",
        )
        .bind(session_id)
        .bind(query_text)
        .bind(intent)
        .bind(source)
        .execute(&self.pool)
        .await
        .context("Failed to write query log")?;

        Ok(())
    }
}
