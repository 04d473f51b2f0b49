//! Line-level helpers shared by the day extractor and the summary synthesizer.
//!
//! Matching is ASCII-oriented: digits are `[0-9]` and the `•` bullet is matched
//! as a literal character.

use std::sync::LazyLock;

use regex::Regex;

static CLOCK_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([0-9]{1,2}:[0-9]{2}(?:\s*[AP]M)?)\b").unwrap()
});

static NUMBERED_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\.").unwrap());

const BULLET: char = '•';

/// A clock-time token found in a line, with the line text around it.
#[derive(Debug, PartialEq)]
pub struct ClockMatch<'a> {
    pub time: &'a str,
    pub rest: String,
}

pub fn find_clock_time(line: &str) -> Option<ClockMatch<'_>> {
    let m = CLOCK_TIME.find(line)?;
    let mut rest = String::with_capacity(line.len() - m.len());
    rest.push_str(&line[..m.start()]);
    rest.push_str(&line[m.end()..]);
    Some(ClockMatch {
        time: m.as_str(),
        rest,
    })
}

/// True when the (already trimmed) line opens with `-`, `•` or an `N.` marker.
pub fn is_list_line(line: &str) -> bool {
    line.starts_with('-') || line.starts_with(BULLET) || NUMBERED_MARKER.is_match(line)
}

/// Strips one leading `-` or `•` and the whitespace around it.
pub fn strip_leading_marker(text: &str) -> &str {
    let text = text.trim_start();
    match text.strip_prefix('-').or_else(|| text.strip_prefix(BULLET)) {
        Some(rest) => rest.trim_start(),
        None => text,
    }
}

/// Strips a leading `-`, `•` or `N.` list marker and the whitespace after it.
pub fn strip_list_marker(text: &str) -> &str {
    let text = text.trim_start();
    if let Some(m) = NUMBERED_MARKER.find(text) {
        return text[m.end()..].trim_start();
    }
    strip_leading_marker(text)
}

/// Splits on the first colon unless it is the first character.
pub fn split_title_description(text: &str) -> (String, String) {
    match text.find(':') {
        Some(idx) if idx > 0 => (
            text[..idx].trim().to_string(),
            text[idx + 1..].trim().to_string(),
        ),
        _ => (text.trim().to_string(), String::new()),
    }
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Keeps `keep` chars and appends `...` when `text` is longer than `max` chars.
pub fn truncate_with_ellipsis(text: &str, max: usize, keep: usize) -> String {
    if char_len(text) <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
