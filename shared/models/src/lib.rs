// Shared data types for the festbot services.
// Owned here so the backend and the embedding client crate agree on
// wire and row shapes without depending on each other.

pub mod chat;
pub mod event;
pub mod knowledge;

pub use chat::{ChatRequest, ChatResponse, Intent, QueryAnalysis, TimeFilter};
pub use event::{Event, EventListing, EventSummary};
pub use knowledge::KnowledgeMatch;
