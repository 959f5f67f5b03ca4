use festbot_models::{Intent, QueryAnalysis, TimeFilter};

/// Campus-facility keywords. Any hit wins over every other class,
/// so "wifi rules" is still a general-info question.
const GENERAL_INFO_KEYWORDS: &[&str] = &[
    "wifi",
    "food",
    "parking",
    "washroom",
    "canteen",
    "certificate",
    "bus",
    "transport",
];

const RULES_KEYWORDS: &[&str] = &["rule", "format", "allow", "banned"];

const FILTER_KEYWORDS: &[(&str, TimeFilter)] = &[
    ("morning", TimeFilter::Morning),
    ("afternoon", TimeFilter::Afternoon),
    ("evening", TimeFilter::Evening),
    ("tomorrow", TimeFilter::Tomorrow),
];

/// Classify a raw user utterance into a coarse intent.
///
/// Keyword heuristics evaluated in a fixed priority order:
/// general-info short-circuits rules, rules beats filter, and anything
/// unclassified defaults to `Details` so the caller tries an
/// event-name match. Infallible and side-effect free.
pub fn analyze(query: &str) -> QueryAnalysis {
    let normalized = query.trim().to_lowercase();

    if GENERAL_INFO_KEYWORDS.iter().any(|k| normalized.contains(k)) {
        return QueryAnalysis::with_intent(Intent::GeneralInfo);
    }

    if RULES_KEYWORDS.iter().any(|k| normalized.contains(k)) {
        return QueryAnalysis::with_intent(Intent::Rules);
    }

    if let Some((_, filter)) = FILTER_KEYWORDS
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
    {
        return QueryAnalysis {
            intent: Intent::Filter,
            target_event: None,
            filter: Some(*filter),
        };
    }

    QueryAnalysis::with_intent(Intent::Details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_info_keywords_short_circuit() {
        assert_eq!(analyze("is there wifi").intent, Intent::GeneralInfo);
        assert_eq!(analyze("where can I get FOOD").intent, Intent::GeneralInfo);
        // general-info wins even when a rules keyword is also present
        assert_eq!(analyze("wifi rules").intent, Intent::GeneralInfo);
        // and even when a filter keyword is also present
        assert_eq!(analyze("canteen tomorrow").intent, Intent::GeneralInfo);
    }

    #[test]
    fn rules_keywords_classify_as_rules() {
        assert_eq!(analyze("rules for hackathon").intent, Intent::Rules);
        assert_eq!(analyze("what format is the quiz").intent, Intent::Rules);
        assert_eq!(analyze("are laptops banned").intent, Intent::Rules);
    }

    #[test]
    fn temporal_keywords_classify_as_filter() {
        let analysis = analyze("events tomorrow");
        assert_eq!(analysis.intent, Intent::Filter);
        assert_eq!(analysis.filter, Some(TimeFilter::Tomorrow));

        let analysis = analyze("what's on in the evening");
        assert_eq!(analysis.filter, Some(TimeFilter::Evening));
    }

    #[test]
    fn rules_beat_filter() {
        assert_eq!(analyze("rules for the morning session").intent, Intent::Rules);
    }

    #[test]
    fn everything_else_defaults_to_details() {
        let analysis = analyze("when is Robowars");
        assert_eq!(analysis.intent, Intent::Details);
        assert_eq!(analysis.filter, None);
    }
}
