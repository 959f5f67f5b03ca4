use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Sweep the session map once it grows past this many entries.
const SWEEP_THRESHOLD: usize = 1024;

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
}

#[derive(Debug)]
struct WindowEntry {
    count: u32,
    window_start: Instant,
}

/// Per-session fixed-window message limiter.
///
/// State is process-local by contract: a restart (or a second
/// instance) silently resets all counters. That is the documented
/// single-instance deployment model, not a defect.
pub struct SessionRateLimiter {
    max_messages: u32,
    window: Duration,
    sessions: Mutex<HashMap<String, WindowEntry>>,
}

impl SessionRateLimiter {
    pub fn new(max_messages: u32, window: Duration) -> Self {
        Self {
            max_messages,
            window,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Count one message against `session_id`'s window.
    ///
    /// Once a session exhausts its quota every further call in the
    /// same window is denied; the counter resets when the window
    /// elapses. Sessions are fully isolated from each other. The map
    /// lock serializes concurrent checks for the same session, so no
    /// message goes uncounted.
    pub fn check(&self, session_id: &str) -> RateLimitDecision {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().unwrap();

        if sessions.len() > SWEEP_THRESHOLD {
            let window = self.window;
            sessions.retain(|_, entry| now.duration_since(entry.window_start) < window);
        }

        let entry = sessions
            .entry(session_id.to_string())
            .or_insert(WindowEntry {
                count: 0,
                window_start: now,
            });

        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.max_messages {
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
            };
        }

        entry.count += 1;
        RateLimitDecision {
            allowed: true,
            remaining: self.max_messages - entry.count,
        }
    }
}
