use serde::{Deserialize, Serialize};

/// Request body for `POST /api/chat`.
///
/// `sessionId` is a client-generated opaque string; nothing about its
/// format is enforced beyond being a string, and a missing value is
/// replaced with a sentinel rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<String>,
}

/// Response body for `POST /api/chat` — always a natural-language
/// sentence, never a raw error code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Coarse intent classes produced by the analyzer.
///
/// `Rules` and `Filter` are classified and logged but the orchestrator
/// does not branch on them yet; they go straight to the event search
/// like `Details`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    GeneralInfo,
    Rules,
    Filter,
    Details,
    Complex,
}

impl Intent {
    /// Stable tag used in the `query_logs.intent` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::GeneralInfo => "general_info",
            Intent::Rules => "rules",
            Intent::Filter => "filter",
            Intent::Details => "details",
            Intent::Complex => "complex",
        }
    }
}

/// Time-of-day filter detected from the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFilter {
    Morning,
    Afternoon,
    Evening,
    Tomorrow,
}

/// Ephemeral per-message analysis result. Created per incoming
/// message and discarded after the request completes.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAnalysis {
    pub intent: Intent,
    pub target_event: Option<String>,
    pub filter: Option<TimeFilter>,
}

impl QueryAnalysis {
    pub fn with_intent(intent: Intent) -> Self {
        Self {
            intent,
            target_event: None,
            filter: None,
        }
    }
}
