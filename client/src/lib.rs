// Session-scoped chat engine for the festival chatbot widget.
//
// This crate holds the state a chat widget keeps between messages:
// the opaque session id, the single "active context" slot remembering
// the last event the bot talked about, and the greeting short-circuit
// that lets the widget answer "hi" without a round trip.

pub mod greeting;
pub mod session;

pub use greeting::is_greeting;
pub use session::ChatSession;
