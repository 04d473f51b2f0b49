//! Day-by-day extraction from a free-text itinerary narrative.
//!
//! The scan runs in named stages: split the narrative on `Day N` markers, read
//! the title and subtitle of each segment, classify every line, then build
//! activities from the lines that carry one. A clock-time token wins over a
//! list marker when a line has both.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ActivityRecord, ItineraryDay, ItinerarySet};
use crate::parser::text::{
    char_len, find_clock_time, is_list_line, split_title_description, strip_leading_marker,
    strip_list_marker,
};

static DAY_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Day [0-9]+:?").unwrap());

const MIN_LINE_LEN: usize = 5;
const DETAILS_NOT_AVAILABLE: &str = "Details not available";

#[derive(Debug, PartialEq)]
enum LineKind<'a> {
    Short,
    Timed { time: &'a str, rest: String },
    Listed { rest: &'a str },
    Prose,
}

pub fn extract_days(text: &str, requested_day_count: u32) -> ItinerarySet {
    let segments = split_day_segments(text);
    let take = segments.len().min(requested_day_count as usize);

    let days: Vec<ItineraryDay> = segments
        .into_iter()
        .take(take)
        .zip(1u32..)
        .filter_map(|(segment, number)| build_day(number, segment))
        .collect();

    if days.is_empty() {
        tracing::debug!(
            requested = requested_day_count,
            "no day sections found, using placeholder itinerary"
        );
        return placeholder_set(requested_day_count);
    }

    if days.len() < requested_day_count as usize {
        tracing::debug!(
            requested = requested_day_count,
            found = days.len(),
            "narrative has fewer day sections than requested"
        );
    }

    ItinerarySet { days }
}

/// Segments after each day marker; text before the first marker is dropped.
fn split_day_segments(text: &str) -> Vec<&str> {
    DAY_MARKER.split(text).skip(1).collect()
}

fn build_day(number: u32, segment: &str) -> Option<ItineraryDay> {
    let content = segment.trim();
    if content.is_empty() {
        return None;
    }

    let lines: Vec<&str> = content.split('\n').collect();

    // content is trimmed and non-empty, so the first line always carries text
    let title = lines[0].trim().to_string();

    let subtitle = lines
        .get(1)
        .map(|l| strip_leading_marker(l.trim()))
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Activities for Day {number}"));

    let mut activities: Vec<ActivityRecord> = lines
        .iter()
        .map(|l| classify_line(l.trim()))
        .filter_map(build_activity)
        .collect();

    if activities.is_empty() {
        activities.push(ActivityRecord::new("All Day", "Explore", DETAILS_NOT_AVAILABLE));
    }

    Some(ItineraryDay {
        id: ItineraryDay::day_id(number),
        number,
        title,
        subtitle,
        activities,
        raw_content: content.to_string(),
    })
}

fn classify_line(line: &str) -> LineKind<'_> {
    let len = char_len(line);
    if len < MIN_LINE_LEN {
        return LineKind::Short;
    }
    if let Some(m) = find_clock_time(line) {
        return LineKind::Timed {
            time: m.time,
            rest: m.rest,
        };
    }
    if is_list_line(line) && len > MIN_LINE_LEN {
        return LineKind::Listed {
            rest: strip_list_marker(line),
        };
    }
    LineKind::Prose
}

fn build_activity(kind: LineKind<'_>) -> Option<ActivityRecord> {
    let (time, text) = match kind {
        LineKind::Timed { time, ref rest } => (time, clean_timed_remainder(rest)),
        LineKind::Listed { rest } => ("", rest),
        LineKind::Short | LineKind::Prose => return None,
    };

    let (title, description) = split_title_description(text);
    if title.is_empty() {
        return None;
    }
    Some(ActivityRecord::new(time, title, description))
}

/// Drops the marker and `:` separator that surround a removed clock token.
fn clean_timed_remainder(rest: &str) -> &str {
    let text = strip_leading_marker(rest);
    let text = text.strip_prefix(':').unwrap_or(text);
    strip_leading_marker(text).trim_end()
}

fn placeholder_set(requested_day_count: u32) -> ItinerarySet {
    let days = (1..=requested_day_count)
        .map(|number| ItineraryDay {
            id: ItineraryDay::day_id(number),
            number,
            title: format!("Day {number}"),
            subtitle: DETAILS_NOT_AVAILABLE.to_string(),
            activities: vec![ActivityRecord::new(
                "All Day",
                "Itinerary activities",
                DETAILS_NOT_AVAILABLE,
            )],
            raw_content: String::new(),
        })
        .collect();
    ItinerarySet { days }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Intro.\nDay 1: Arrival\nCity tour\n9:00 AM: Breakfast: at hotel\n- Evening walk\nDay 2: Departure\nFlight home";

    #[test]
    fn test_extracts_sample_days() {
        let set = extract_days(SAMPLE, 2);
        assert_eq!(set.len(), 2);

        let day1 = &set.days[0];
        assert_eq!(day1.id, "day1");
        assert_eq!(day1.number, 1);
        assert_eq!(day1.title, "Arrival");
        assert_eq!(day1.subtitle, "City tour");
        assert_eq!(
            day1.activities,
            vec![
                ActivityRecord::new("9:00 AM", "Breakfast", "at hotel"),
                ActivityRecord::new("", "Evening walk", ""),
            ]
        );

        let day2 = &set.days[1];
        assert_eq!(day2.title, "Departure");
        assert_eq!(day2.subtitle, "Flight home");
        assert_eq!(
            day2.activities,
            vec![ActivityRecord::new("All Day", "Explore", "Details not available")]
        );
    }

    #[test]
    fn test_no_markers_yields_full_placeholder_set() {
        for text in ["", "   ", "just prose with no structure", "\u{0}\u{1}\u{fffd}garbage"] {
            for n in [1, 3, 7, 14] {
                let set = extract_days(text, n);
                assert_eq!(set.len(), n as usize, "text={text:?} n={n}");
                for (i, day) in set.days.iter().enumerate() {
                    assert_eq!(day.number, i as u32 + 1);
                    assert_eq!(day.title, format!("Day {}", i + 1));
                    assert_eq!(day.subtitle, "Details not available");
                    assert_eq!(day.raw_content, "");
                    assert_eq!(
                        day.activities,
                        vec![ActivityRecord::new(
                            "All Day",
                            "Itinerary activities",
                            "Details not available"
                        )]
                    );
                }
            }
        }
    }

    #[test]
    fn test_markers_with_empty_segments_fall_back_to_placeholders() {
        let set = extract_days("Day 1:\n\nDay 2:   ", 3);
        assert_eq!(set.len(), 3);
        assert_eq!(set.days[2].subtitle, "Details not available");
    }

    #[test]
    fn test_days_beyond_request_are_dropped() {
        let set = extract_days(SAMPLE, 1);
        assert_eq!(set.len(), 1);
        assert_eq!(set.days[0].title, "Arrival");
    }

    #[test]
    fn test_fewer_markers_than_requested_returns_short_set() {
        let set = extract_days(SAMPLE, 5);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_empty_segment_keeps_numbering() {
        let text = "Day 1: Rome\n- Colosseum tour\nDay 2:\nDay 3: Florence\n- Uffizi gallery";
        let set = extract_days(text, 3);
        let numbers: Vec<u32> = set.days.iter().map(|d| d.number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(set.days[1].id, "day3");
    }

    #[test]
    fn test_every_day_has_an_activity() {
        let text = "Day 1: Slow day\nNothing planned\nDay 2: Also slow\nDay 3\nRest";
        let set = extract_days(text, 3);
        assert_eq!(set.len(), 3);
        assert!(set.days.iter().all(|d| !d.activities.is_empty()));
    }

    #[test]
    fn test_marker_is_case_insensitive_and_colon_optional() {
        let text = "DAY 1 Lisbon\n- Tram 28 ride\nday 2: Sintra\n- Pena Palace";
        let set = extract_days(text, 2);
        assert_eq!(set.days[0].title, "Lisbon");
        assert_eq!(set.days[1].title, "Sintra");
    }

    #[test]
    fn test_whitespace_only_segment_falls_back_to_placeholders() {
        let set = extract_days("Day 1:\n\n", 1);
        assert_eq!(set.len(), 1);
        assert_eq!(set.days[0].title, "Day 1");
        assert_eq!(set.days[0].subtitle, DETAILS_NOT_AVAILABLE);
    }

    #[test]
    fn test_default_subtitle_for_title_only_day() {
        let set = extract_days("Day 1: Only a title", 1);
        assert_eq!(set.days[0].title, "Only a title");
        assert_eq!(set.days[0].subtitle, "Activities for Day 1");
    }

    #[test]
    fn test_subtitle_strips_dash_and_bullet() {
        let set = extract_days("Day 1: Paris\n- Check-in, Eiffel Tower", 1);
        assert_eq!(set.days[0].subtitle, "Check-in, Eiffel Tower");

        let set = extract_days("Day 1: Paris\n• Louvre and Seine", 1);
        assert_eq!(set.days[0].subtitle, "Louvre and Seine");
    }

    #[test]
    fn test_time_takes_precedence_over_bullet() {
        let set = extract_days("Day 1: Kyoto\n- 10:30 AM: Fushimi Inari: arrive early", 1);
        let activity = &set.days[0].activities[0];
        assert_eq!(activity.time, "10:30 AM");
        assert_eq!(activity.title, "Fushimi Inari");
        assert_eq!(activity.description, "arrive early");
    }

    #[test]
    fn test_time_with_dash_separator() {
        let set = extract_days("Day 1: Kyoto\n7:00 PM - Dinner in Gion", 1);
        let activity = &set.days[0].activities[0];
        assert_eq!(activity.time, "7:00 PM");
        assert_eq!(activity.title, "Dinner in Gion");
        assert_eq!(activity.description, "");
    }

    #[test]
    fn test_numbered_list_lines_become_activities() {
        let set = extract_days("Day 1: Berlin\n1. Brandenburg Gate\n2. Museum Island: Pergamon", 1);
        let titles: Vec<&str> = set.days[0]
            .activities
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Brandenburg Gate", "Museum Island"]);
        assert_eq!(set.days[0].activities[1].description, "Pergamon");
    }

    #[test]
    fn test_time_only_line_is_discarded() {
        let set = extract_days("Day 1: Oslo\n10:00 AM\n- Fjord cruise", 1);
        assert_eq!(set.days[0].activities.len(), 1);
        assert_eq!(set.days[0].activities[0].title, "Fjord cruise");
    }

    #[test]
    fn test_short_lines_are_skipped() {
        let set = extract_days("Day 1: Nice\n- Sea\n- Beach", 1);
        // "- Sea" is under five chars, "- Beach" qualifies
        assert_eq!(set.days[0].activities.len(), 1);
        assert_eq!(set.days[0].activities[0].title, "Beach");
    }

    #[test]
    fn test_costs_are_never_set() {
        let set = extract_days(SAMPLE, 2);
        assert!(set
            .days
            .iter()
            .flat_map(|d| d.activities.iter())
            .all(|a| a.cost.is_none()));
    }

    #[test]
    fn test_raw_content_reextracts_identically() {
        let set = extract_days(SAMPLE, 2);
        for day in &set.days {
            let again = extract_days(&format!("Day 1: {}", day.raw_content), 1);
            let redo = &again.days[0];
            assert_eq!(redo.title, day.title);
            assert_eq!(redo.subtitle, day.subtitle);
            assert_eq!(redo.activities, day.activities);
        }
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line("Sea"), LineKind::Short);
        assert_eq!(classify_line("Walk around"), LineKind::Prose);
        assert_eq!(
            classify_line("- Gelato stop"),
            LineKind::Listed {
                rest: "Gelato stop"
            }
        );
        assert!(matches!(
            classify_line("- 8:15 AM Train"),
            LineKind::Timed { time: "8:15 AM", .. }
        ));
    }
}
