/// Greeting phrases the widget answers locally with a canned welcome
/// instead of issuing a backend query.
const GREETINGS: &[&str] = &[
    "hi",
    "hii",
    "hiii",
    "hello",
    "hey",
    "yo",
    "sup",
    "hola",
    "namaste",
    "good morning",
    "good afternoon",
    "good evening",
];

/// Lightweight two-class classifier: GREETING vs everything else.
///
/// A message counts as a greeting when it equals a known phrase or
/// starts with one followed by whitespace or punctuation ("hey there!").
pub fn is_greeting(message: &str) -> bool {
    let normalized = message.trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }

    GREETINGS.iter().any(|g| {
        normalized == *g
            || normalized
                .strip_prefix(g)
                .map(|rest| rest.starts_with([' ', '!', ',', '.', '?']))
                .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_greetings_match() {
        assert!(is_greeting("hi"));
        assert!(is_greeting("  Hello  "));
        assert!(is_greeting("NAMASTE"));
    }

    #[test]
    fn prefix_greetings_match() {
        assert!(is_greeting("hey there"));
        assert!(is_greeting("good morning everyone!"));
        assert!(is_greeting("hi!"));
    }

    #[test]
    fn queries_are_not_greetings() {
        assert!(!is_greeting("when is robowars"));
        assert!(!is_greeting(""));
        // "hi" embedded in a longer word must not trigger
        assert!(!is_greeting("highlight the schedule"));
    }
}
