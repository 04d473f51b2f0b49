use std::sync::LazyLock;

use regex::Regex;

use crate::models::{DerivedSummary, Variant};
use crate::parser::text::{
    char_len, is_list_line, round_half_up, strip_list_marker, truncate_with_ellipsis,
};
use crate::parser::DEFAULT_DAY_COUNT;

static DAY_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)([0-9]+)\s*days?").unwrap());

const MAX_HIGHLIGHTS: usize = 4;
const HIGHLIGHT_MAX_CHARS: usize = 50;
const HIGHLIGHT_KEEP_CHARS: usize = 47;

pub fn synthesize_summary(
    text: &str,
    variant: Variant,
    destination: &str,
    budget: f64,
) -> DerivedSummary {
    let days = parse_day_count(text);

    let mut highlights = extract_highlights(text);
    if highlights.is_empty() {
        highlights = variant
            .default_highlights()
            .iter()
            .map(|h| h.to_string())
            .collect();
    }

    DerivedSummary {
        variant,
        title: variant.title_for(destination),
        subtitle: format!("{days} days{}", variant.subtitle_suffix()),
        destination: destination.to_string(),
        days,
        total_cost: round_half_up(budget * variant.cost_multiplier()),
        highlights,
        full_itinerary: text.to_string(),
    }
}

/// First integer followed by "day"/"days", or 7.
pub fn parse_day_count(text: &str) -> u32 {
    DAY_COUNT
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(DEFAULT_DAY_COUNT)
}

pub fn extract_highlights(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| {
            let len = char_len(line);
            is_list_line(line) && len > 5 && len < 80
        })
        .map(strip_list_marker)
        .filter(|h| !h.is_empty())
        .map(|h| truncate_with_ellipsis(h, HIGHLIGHT_MAX_CHARS, HIGHLIGHT_KEEP_CHARS))
        .take(MAX_HIGHLIGHTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_scaling() {
        let text = "A short trip";
        assert_eq!(synthesize_summary(text, Variant::Luxury, "Rome", 2000.0).total_cost, 3000);
        assert_eq!(synthesize_summary(text, Variant::Budget, "Rome", 2000.0).total_cost, 1400);
        assert_eq!(synthesize_summary(text, Variant::Standard, "Rome", 2000.0).total_cost, 2000);
        assert_eq!(synthesize_summary(text, Variant::Standard, "Rome", 1234.5).total_cost, 1235);
    }

    #[test]
    fn test_day_count_parsing() {
        let summary = synthesize_summary(
            "A wonderful 10 days in Japan...",
            Variant::Standard,
            "Japan",
            2000.0,
        );
        assert_eq!(summary.days, 10);
        assert_eq!(parse_day_count("Stay for 3day"), 3);
        assert_eq!(parse_day_count("A 5 DAY escape"), 5);
        assert_eq!(parse_day_count("Day 1: Arrival"), 7);
        assert_eq!(parse_day_count(""), 7);
        assert_eq!(parse_day_count("99999999999 days"), 7);
    }

    #[test]
    fn test_titles_and_subtitles() {
        let text = "Your 5 days in Lisbon";
        let standard = synthesize_summary(text, Variant::Standard, "Lisbon", 1000.0);
        assert_eq!(standard.title, "Lisbon Trip");
        assert_eq!(standard.subtitle, "5 days • Balanced • Standard");

        let budget = synthesize_summary(text, Variant::Budget, "Lisbon", 1000.0);
        assert_eq!(budget.title, "Budget Lisbon Trip");
        assert_eq!(budget.subtitle, "5 days • Value • Budget-friendly");

        let luxury = synthesize_summary(text, Variant::Luxury, "Lisbon", 1000.0);
        assert_eq!(luxury.title, "Luxury Lisbon Experience");
        assert_eq!(luxury.subtitle, "5 days • Premium • Luxury");
    }

    #[test]
    fn test_highlights_collected_in_order_up_to_four() {
        let text = "Overview\n- Colosseum guided tour\n• Vatican Museums\n3. Trastevere food walk\n- Borghese Gallery\n- Appian Way bike ride";
        let summary = synthesize_summary(text, Variant::Standard, "Rome", 2000.0);
        assert_eq!(
            summary.highlights,
            vec![
                "Colosseum guided tour",
                "Vatican Museums",
                "Trastevere food walk",
                "Borghese Gallery",
            ]
        );
    }

    #[test]
    fn test_highlight_length_bounds() {
        let too_long = format!("- {}", "x".repeat(80));
        let text = format!("- Tiny\n- Sea\n{too_long}\n- Harbour cruise");
        // "- Tiny" is six chars and qualifies; "- Sea" does not
        assert_eq!(extract_highlights(&text), vec!["Tiny", "Harbour cruise"]);

        let longest = format!("- {}", "y".repeat(77));
        let over = format!("- {}", "z".repeat(78));
        assert_eq!(longest.chars().count(), 79);
        assert_eq!(over.chars().count(), 80);
        let text = format!("{over}\n{longest}");
        assert_eq!(extract_highlights(&text), vec![format!("{}...", "y".repeat(47))]);
    }

    #[test]
    fn test_highlight_truncation() {
        let line = format!("- {}", "a".repeat(58));
        assert_eq!(line.len(), 60);
        let highlights = extract_highlights(&line);
        assert_eq!(highlights[0].chars().count(), 50);
        assert_eq!(highlights[0], format!("{}...", "a".repeat(47)));
    }

    #[test]
    fn test_highlight_fallback_is_deterministic() {
        let text = "Plain prose about a lovely week away.";
        for variant in Variant::ALL {
            let expected: Vec<String> = variant
                .default_highlights()
                .iter()
                .map(|s| s.to_string())
                .collect();
            for _ in 0..3 {
                let summary = synthesize_summary(text, variant, "Oslo", 2000.0);
                assert_eq!(summary.highlights, expected);
            }
        }
    }

    #[test]
    fn test_summary_keeps_full_itinerary_and_destination() {
        let text = "Day 1: Arrival\n- Canal tour";
        let summary = synthesize_summary(text, Variant::Budget, "Amsterdam", 900.0);
        assert_eq!(summary.full_itinerary, text);
        assert_eq!(summary.destination, "Amsterdam");
        assert_eq!(summary.variant, Variant::Budget);
    }
}
