use festbot_models::ChatRequest;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

/// First bolded span in a bot reply, e.g. `**Robowars**`.
static BOLD_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold-span pattern"));

/// Bolded labels that are template furniture, never event names.
const EXCLUDED_LABELS: &[&str] = &["Date", "Time", "Venue", "Prize", "Team"];

/// Words that suggest the message refers back to an earlier event.
const CONTEXT_TRIGGERS: &[&str] = &[
    "when", "where", "time", "venue", "cost", "prize", "rules", "team", "it", "details", "about",
];

/// Words that signal a fresh intent, suppressing enrichment.
const NEW_INTENT_MARKERS: &[&str] = &["next", "all", "show", "list"];

/// Messages at or above this word count are treated as self-contained.
const SHORT_MESSAGE_WORDS: usize = 8;

/// One chat session as kept by the widget: an opaque id generated once
/// per browser session, and a single mutable slot holding the name of
/// the event the bot last talked about.
///
/// Enrichment is a heuristic. A short follow-up like "where is it?"
/// gets the remembered event name appended so the backend's fuzzy
/// search has something to bite on; false positives are acceptable and
/// the backend treats the appended name as plain query text.
#[derive(Debug, Clone)]
pub struct ChatSession {
    session_id: String,
    active_context: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            active_context: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn active_context(&self) -> Option<&str> {
        self.active_context.as_deref()
    }

    /// Update the active context from a bot reply.
    ///
    /// The first `**Name**` span whose text is not a generic template
    /// label overwrites the slot; replies without a recognizable name
    /// leave the previous context in place (last-write-wins, never
    /// cleared).
    pub fn observe_reply(&mut self, reply: &str) {
        for caps in BOLD_SPAN.captures_iter(reply) {
            let candidate = caps[1].trim();
            if candidate.is_empty() {
                continue;
            }
            if EXCLUDED_LABELS
                .iter()
                .any(|label| label.eq_ignore_ascii_case(candidate))
            {
                continue;
            }
            log::debug!("active context -> {}", candidate);
            self.active_context = Some(candidate.to_string());
            return;
        }
    }

    /// Decide whether `message` needs the active context appended, and
    /// return the payload that should be sent to the backend.
    ///
    /// Enrichment happens only when a context exists, the message is
    /// short, contains a context-dependent trigger word, and carries no
    /// new-intent marker.
    pub fn prepare_message(&self, message: &str) -> String {
        let context = match &self.active_context {
            Some(c) => c,
            None => return message.to_string(),
        };

        let words: Vec<String> = message
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .collect();

        if words.len() >= SHORT_MESSAGE_WORDS {
            return message.to_string();
        }
        if words
            .iter()
            .any(|w| NEW_INTENT_MARKERS.contains(&w.as_str()))
        {
            return message.to_string();
        }
        if !words.iter().any(|w| CONTEXT_TRIGGERS.contains(&w.as_str())) {
            return message.to_string();
        }

        format!("{} {}", message, context)
    }

    /// Build the outgoing request body for one user message.
    pub fn build_request(&self, message: &str) -> ChatRequest {
        ChatRequest {
            message: Some(self.prepare_message(message)),
            session_id: Some(self.session_id.clone()),
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_context(name: &str) -> ChatSession {
        let mut session = ChatSession::new();
        session.observe_reply(&format!("**{}** happens at **Main Arena**.", name));
        session
    }

    #[test]
    fn reply_sets_active_context() {
        let session = session_with_context("Robowars");
        assert_eq!(session.active_context(), Some("Robowars"));
    }

    #[test]
    fn template_labels_are_skipped() {
        let mut session = ChatSession::new();
        session.observe_reply("**Date** TBA, **Time** TBA for **Hackathon 2026**");
        assert_eq!(session.active_context(), Some("Hackathon 2026"));
    }

    #[test]
    fn reply_without_name_keeps_previous_context() {
        let mut session = session_with_context("Robowars");
        session.observe_reply("I couldn't find an event with that name.");
        assert_eq!(session.active_context(), Some("Robowars"));
    }

    #[test]
    fn later_reply_overwrites_context() {
        let mut session = session_with_context("Robowars");
        session.observe_reply("**Hackathon 2026** kicks off on **Mar 4, 2026**.");
        assert_eq!(session.active_context(), Some("Hackathon 2026"));
    }

    #[test]
    fn short_trigger_message_is_enriched() {
        let session = session_with_context("Robowars");
        assert_eq!(session.prepare_message("where is it?"), "where is it? Robowars");
    }

    #[test]
    fn new_intent_marker_suppresses_enrichment() {
        let session = session_with_context("Robowars");
        assert_eq!(session.prepare_message("show all events"), "show all events");
    }

    #[test]
    fn long_message_is_not_enriched() {
        let session = session_with_context("Robowars");
        let msg = "can you tell me where the registration desk is located today";
        assert_eq!(session.prepare_message(msg), msg);
    }

    #[test]
    fn no_trigger_word_means_no_enrichment() {
        let session = session_with_context("Robowars");
        assert_eq!(session.prepare_message("thanks a lot"), "thanks a lot");
    }

    #[test]
    fn no_context_passes_message_through() {
        let session = ChatSession::new();
        assert_eq!(session.prepare_message("where is it?"), "where is it?");
    }

    #[test]
    fn build_request_carries_session_id() {
        let session = session_with_context("Robowars");
        let req = session.build_request("when is it");
        assert_eq!(req.message.as_deref(), Some("when is it Robowars"));
        assert_eq!(req.session_id.as_deref(), Some(session.session_id()));
    }
}
