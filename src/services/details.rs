use chrono::{Days, NaiveDate};

use crate::models::trip::{normalize_day_count, DEFAULT_BUDGET};
use crate::models::{CostBreakdown, DerivedSummary, ItineraryDetails};
use crate::parser::extract_days;

const FALLBACK_TITLE: &str = "Your Travel Itinerary";

/// Builds the itinerary-viewer document for a stored summary.
///
/// Days are extracted from the summary's narrative using the summary's own day
/// count. The date range runs from `start_date` to `start_date + days`.
pub fn build_details(summary: &DerivedSummary, start_date: NaiveDate) -> ItineraryDetails {
    let day_count = normalize_day_count(summary.days);
    let set = extract_days(&summary.full_itinerary, day_count);

    let total_cost = if summary.total_cost == 0 {
        DEFAULT_BUDGET as i64
    } else {
        summary.total_cost
    };

    let title = if summary.title.trim().is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        summary.title.clone()
    };

    ItineraryDetails {
        title,
        dates: format_date_range(start_date, day_count),
        total_cost,
        days: set.days,
        cost_breakdown: CostBreakdown::from_total(total_cost),
        raw_itinerary: summary.full_itinerary.clone(),
    }
}

pub fn format_date_range(start: NaiveDate, days: u32) -> String {
    let end = start
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(start);
    format!("{} - {}", format_date(start), format_date(end))
}

fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
