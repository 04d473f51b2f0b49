use std::collections::HashSet;

use serde::Serialize;

use crate::parser::text::char_len;

#[derive(Debug, Clone, Copy)]
pub struct EditGate {
    pub min_length_ratio: f64,
    pub min_line_overlap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditRejection {
    Empty,
    Shrunk { ratio: f64 },
    LowOverlap { ratio: f64 },
}

impl std::fmt::Display for EditRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditRejection::Empty => write!(f, "the edited itinerary came back empty"),
            EditRejection::Shrunk { ratio } => write!(
                f,
                "the edited itinerary is only {:.0}% of the original length",
                ratio * 100.0
            ),
            EditRejection::LowOverlap { ratio } => write!(
                f,
                "the edited itinerary keeps only {:.0}% of the original lines",
                ratio * 100.0
            ),
        }
    }
}

impl EditGate {
    pub fn new(min_length_ratio: f64, min_line_overlap: f64) -> Self {
        Self {
            min_length_ratio,
            min_line_overlap,
        }
    }

    /// Accepts `candidate` as a replacement for `current`, or says why not.
    pub fn check(&self, current: &str, candidate: &str) -> Result<(), EditRejection> {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return Err(EditRejection::Empty);
        }

        let current_len = char_len(current.trim());
        if current_len > 0 {
            let ratio = char_len(candidate) as f64 / current_len as f64;
            if ratio < self.min_length_ratio {
                return Err(EditRejection::Shrunk { ratio });
            }
        }

        let ratio = line_overlap(current, candidate);
        if ratio < self.min_line_overlap {
            return Err(EditRejection::LowOverlap { ratio });
        }

        Ok(())
    }
}

/// Share of the non-empty trimmed lines of `original` that survive in `edited`.
pub fn line_overlap(original: &str, edited: &str) -> f64 {
    let kept: HashSet<&str> = non_empty_lines(edited).collect();
    let (total, shared) = non_empty_lines(original).fold((0usize, 0usize), |(total, shared), line| {
        (total + 1, shared + kept.contains(line) as usize)
    });
    if total == 0 {
        return 1.0;
    }
    shared as f64 / total as f64
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}
