use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full event row as stored in the `events` table.
///
/// The chatbot only reads events; all writes happen through the admin
/// dashboard, so every optional field here really can be NULL in the
/// database while an event is still being announced.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub venue: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub registration_starts_at: Option<DateTime<Utc>>,
    pub registration_ends_at: Option<DateTime<Utc>>,
    pub prize_pool: Option<String>,
    pub team_size_min: Option<i32>,
    pub team_size_max: Option<i32>,
    pub registration_open: bool,
}

/// Minimal row returned by the `search_events_fuzzy` stored function.
/// The full record is fetched in a second round trip on a hit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventSummary {
    pub id: Uuid,
    pub name: String,
}

/// Slim row for the public events listing: just what the event cards
/// show, no descriptions or registration window.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventListing {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub registration_open: bool,
}
