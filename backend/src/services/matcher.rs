use strsim::jaro_winkler;

/// Default similarity floor for accepting a match. Tuned so a close
/// partial query like "rules for hackathon" still lands on
/// "Hackathon 2026" while alphabet soup falls through to the fallback.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.55;

/// Words that routinely surround an event name in a question and only
/// skew the similarity score. Stripped before matching.
const BOILERPLATE_WORDS: &[&str] = &[
    "rules",
    "regulations",
    "format",
    "details",
    "about",
    "when",
    "where",
    "is",
];

/// Tokens shorter than this add more noise than signal to the
/// token-level comparison.
const MIN_TOKEN_LEN: usize = 3;

/// Fuzzy-match a user query against the known event names.
///
/// Returns the best-scoring candidate above `threshold`, or `None`.
/// Ties go to the earlier candidate: a later one replaces the leader
/// only on a strictly greater score, so the result is stable for a
/// given candidate order. Deterministic for the same inputs.
pub fn find_event_match<'a>(
    query: &str,
    candidates: &'a [String],
    threshold: f64,
) -> Option<&'a str> {
    let cleaned = clean_query(query);
    if cleaned.is_empty() {
        return None;
    }

    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = similarity(&cleaned, candidate);
        match best {
            Some((_, leader)) if score <= leader => {}
            _ => best = Some((candidate.as_str(), score)),
        }
    }

    best.filter(|(_, score)| *score >= threshold)
        .map(|(name, _)| name)
}

/// Lowercase the query and drop boilerplate words.
fn clean_query(query: &str) -> String {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| !BOILERPLATE_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Score a cleaned query against one candidate name.
///
/// Whole-string Jaro-Winkler catches near-complete names; the
/// token-level pass catches an event name buried in a longer question
/// ("for hackathon" vs "Hackathon 2026"), slightly damped so a full
/// match still outranks a single-word one.
fn similarity(cleaned: &str, candidate: &str) -> f64 {
    let candidate_lower = candidate.to_lowercase();
    let whole = jaro_winkler(cleaned, &candidate_lower);

    let token_best = cleaned
        .split_whitespace()
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
        .flat_map(|query_token| {
            candidate_lower
                .split_whitespace()
                .map(move |name_token| jaro_winkler(query_token, name_token))
        })
        .fold(0.0_f64, f64::max);

    whole.max(token_best * 0.95)
}
