use chrono::{DateTime, FixedOffset, Utc};
use festbot_models::Event;
use once_cell::sync::Lazy;
use regex::Regex;

/// Festival timezone (IST, UTC+05:30). All user-facing timestamps are
/// rendered in this offset regardless of where the service runs.
static FEST_OFFSET: Lazy<FixedOffset> =
    Lazy::new(|| FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("valid IST offset"));

/// Which facet of an event the user is asking about. Detected by
/// mutually exclusive regex checks in a fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Time,
    Venue,
    Prize,
    Team,
    General,
}

static FACET_PATTERNS: Lazy<Vec<(Regex, Facet)>> = Lazy::new(|| {
    // Priority order matters: first match wins.
    vec![
        (
            Regex::new(r"\b(when|time|start|begin|date|schedule)\b").expect("time pattern"),
            Facet::Time,
        ),
        (
            Regex::new(r"\b(where|venue|location|place|hall)\b").expect("venue pattern"),
            Facet::Venue,
        ),
        (
            Regex::new(r"\b(prize|pool|reward|cash|winning|worth)\b").expect("prize pattern"),
            Facet::Prize,
        ),
        (
            Regex::new(r"\b(team|member|size|solo|duo|squad|group)\b").expect("team pattern"),
            Facet::Team,
        ),
    ]
});

/// First-match-wins facet detection; anything unmatched is General.
pub fn detect_facet(query: &str) -> Facet {
    let normalized = query.to_lowercase();
    FACET_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(&normalized))
        .map(|(_, facet)| *facet)
        .unwrap_or(Facet::General)
}

fn fest_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&*FEST_OFFSET).format("%b %-d, %Y").to_string()
}

fn fest_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&*FEST_OFFSET).format("%-I:%M %p").to_string()
}

fn team_size_text(event: &Event) -> Option<String> {
    match (event.team_size_min, event.team_size_max) {
        (Some(1), Some(1)) => Some("solo event".to_string()),
        (Some(min), Some(max)) if min == max => Some(format!("teams of exactly {}", min)),
        (Some(min), Some(max)) => Some(format!("teams of {} to {} members", min, max)),
        (Some(min), None) => Some(format!("teams of {}+ members", min)),
        (None, Some(max)) => Some(format!("teams of up to {} members", max)),
        (None, None) => None,
    }
}

/// Render a reply for a fully resolved event.
///
/// Pure and idempotent: the output depends only on the event snapshot
/// and the query, never on the wall clock. Missing optional fields
/// degrade to fixed placeholder text instead of being omitted.
pub fn format_reply(event: &Event, query: &str) -> String {
    match detect_facet(query) {
        Facet::Time => {
            let (date, time) = match event.starts_at {
                Some(ts) => (fest_date(ts), fest_time(ts)),
                None => ("Date TBA".to_string(), "Time TBA".to_string()),
            };
            format!("**{}** kicks off on **{}** at **{}**.", event.name, date, time)
        }
        Facet::Venue => match &event.venue {
            Some(venue) => format!("**{}** happens at **{}**.", event.name, venue),
            None => format!("The venue for **{}** is not announced yet.", event.name),
        },
        Facet::Prize => match &event.prize_pool {
            Some(prize) => format!("**{}** has a prize pool of **{}**! 🏆", event.name, prize),
            None => format!("Prizes for **{}** are not announced yet.", event.name),
        },
        Facet::Team => match team_size_text(event) {
            Some(team) => format!("**{}** is a {}.", event.name, team),
            None => format!("Team size for **{}** is not announced yet.", event.name),
        },
        Facet::General => format_general(event),
    }
}

/// Summary card: headline, schedule, venue, then the short description
/// and a pipe-separated chip line when those fields are available.
fn format_general(event: &Event) -> String {
    let mut lines = vec![format!("**{}** — {}", event.name, event.category)];

    match event.starts_at {
        Some(ts) => lines.push(format!("📅 {} • {}", fest_date(ts), fest_time(ts))),
        None => lines.push("📅 Date TBA".to_string()),
    }
    lines.push(format!(
        "📍 {}",
        event.venue.as_deref().unwrap_or("Venue TBA")
    ));

    if let Some(description) = &event.description {
        lines.push(description.clone());
    }

    let mut chips = Vec::new();
    if let Some(prize) = &event.prize_pool {
        chips.push(format!("💰 {}", prize));
    }
    if let Some(team) = team_size_text(event) {
        chips.push(format!("👥 {}", team));
    }
    if !chips.is_empty() {
        lines.push(chips.join(" | "));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn event() -> Event {
        Event {
            id: Uuid::new_v4(),
            name: "Robowars".to_string(),
            category: "Robotics".to_string(),
            description: Some("Bots battle it out in the arena.".to_string()),
            long_description: None,
            venue: Some("Main Arena".to_string()),
            // 2026-03-04 09:00 UTC = 14:30 IST
            starts_at: Some(Utc.with_ymd_and_hms(2026, 3, 4, 9, 0, 0).unwrap()),
            ends_at: None,
            registration_starts_at: None,
            registration_ends_at: None,
            prize_pool: Some("₹50,000".to_string()),
            team_size_min: Some(2),
            team_size_max: Some(4),
            registration_open: true,
        }
    }

    #[test]
    fn facet_priority_is_time_first() {
        // "when" and "where" both present: time wins.
        assert_eq!(detect_facet("when and where is it"), Facet::Time);
        assert_eq!(detect_facet("where is it"), Facet::Venue);
        assert_eq!(detect_facet("prize money"), Facet::Prize);
        assert_eq!(detect_facet("team size"), Facet::Team);
        assert_eq!(detect_facet("tell me everything"), Facet::General);
    }

    #[test]
    fn time_reply_localizes_to_ist() {
        let reply = format_reply(&event(), "when is robowars");
        assert!(reply.contains("Robowars"));
        assert!(reply.contains("Mar 4, 2026"));
        assert!(reply.contains("2:30 PM"));
    }

    #[test]
    fn missing_start_degrades_to_tba() {
        let mut e = event();
        e.starts_at = None;
        let reply = format_reply(&e, "what time does it start");
        assert!(reply.contains("Date TBA"));
        assert!(reply.contains("Time TBA"));
    }

    #[test]
    fn missing_venue_degrades_gracefully() {
        let mut e = event();
        e.venue = None;
        let reply = format_reply(&e, "where is robowars");
        assert!(reply.contains("not announced yet"));
        assert!(reply.contains("Robowars"));
    }

    #[test]
    fn general_reply_includes_description_and_chips() {
        let reply = format_reply(&event(), "robowars");
        assert!(reply.starts_with("**Robowars** — Robotics"));
        assert!(reply.contains("Bots battle it out in the arena."));
        assert!(reply.contains("💰 ₹50,000 | 👥 teams of 2 to 4 members"));
    }

    #[test]
    fn solo_team_size_reads_naturally() {
        let mut e = event();
        e.team_size_min = Some(1);
        e.team_size_max = Some(1);
        let reply = format_reply(&e, "team size");
        assert!(reply.contains("solo event"));
    }

    #[test]
    fn formatting_is_idempotent() {
        let e = event();
        assert_eq!(
            format_reply(&e, "when is robowars"),
            format_reply(&e, "when is robowars")
        );
        assert_eq!(format_reply(&e, "robowars"), format_reply(&e, "robowars"));
    }
}
