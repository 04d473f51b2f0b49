use axum::Json;
use serde::Deserialize;

use crate::models::trip::{normalize_day_count, DEFAULT_BUDGET};
use crate::models::{DerivedSummary, ItinerarySet, Variant};
use crate::parser::{extract_days, synthesize_summary, DEFAULT_DAY_COUNT};

// POST /api/parse/days
#[derive(Deserialize)]
pub struct ParseDaysRequest {
    #[serde(default)]
    pub text: String,
    pub days: Option<u32>,
}

pub async fn parse_days(Json(payload): Json<ParseDaysRequest>) -> Json<ItinerarySet> {
    let days = normalize_day_count(payload.days.unwrap_or(DEFAULT_DAY_COUNT));
    Json(extract_days(&payload.text, days))
}

// POST /api/parse/summary
#[derive(Deserialize)]
pub struct ParseSummaryRequest {
    #[serde(default)]
    pub text: String,
    pub variant: Variant,
    #[serde(default)]
    pub destination: String,
    pub budget: Option<f64>,
}

pub async fn parse_summary(Json(payload): Json<ParseSummaryRequest>) -> Json<DerivedSummary> {
    let budget = payload.budget.unwrap_or(DEFAULT_BUDGET);
    Json(synthesize_summary(
        &payload.text,
        payload.variant,
        payload.destination.trim(),
        budget,
    ))
}
