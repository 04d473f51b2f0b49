use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{ItineraryDetails, TripRequest, Variant};
use crate::services::planner::{self, EditOutcome, GuideAnswer, TripOverview};
use crate::state::AppState;

fn parse_variant(raw: &str) -> Result<Variant, AppError> {
    Variant::parse(raw).ok_or_else(|| AppError::NotFound(format!("variant {raw}")))
}

// POST /api/trips
pub async fn create_trip(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TripRequest>,
) -> Result<(StatusCode, Json<TripOverview>), AppError> {
    let overview = planner::create_trip(&state, request).await?;
    Ok((StatusCode::CREATED, Json(overview)))
}

// GET /api/trips/:session_id
pub async fn get_trip(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<TripOverview>, AppError> {
    Ok(Json(planner::get_overview(&state, &session_id)?))
}

// GET /api/trips/:session_id/:variant
#[derive(Deserialize)]
pub struct DetailsQuery {
    pub start: Option<NaiveDate>,
}

pub async fn get_itinerary(
    State(state): State<Arc<AppState>>,
    Path((session_id, variant)): Path<(String, String)>,
    Query(query): Query<DetailsQuery>,
) -> Result<Json<ItineraryDetails>, AppError> {
    let variant = parse_variant(&variant)?;
    Ok(Json(planner::get_details(
        &state,
        &session_id,
        variant,
        query.start,
    )?))
}

// POST /api/trips/:session_id/:variant/edit
#[derive(Deserialize)]
pub struct EditRequest {
    pub instruction: String,
}

pub async fn edit_itinerary(
    State(state): State<Arc<AppState>>,
    Path((session_id, variant)): Path<(String, String)>,
    Json(payload): Json<EditRequest>,
) -> Result<Response, AppError> {
    let variant = parse_variant(&variant)?;

    let outcome =
        planner::edit_itinerary(&state, &session_id, variant, &payload.instruction).await?;

    let response = match outcome {
        EditOutcome::Accepted(summary) => Json(serde_json::json!({
            "accepted": true,
            "summary": summary,
        }))
        .into_response(),
        EditOutcome::Rejected(reason) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({
                "accepted": false,
                "reason": reason.to_string(),
                "rejection": reason,
            })),
        )
            .into_response(),
    };
    Ok(response)
}

// POST /api/trips/:session_id/:variant/ask
#[derive(Deserialize)]
pub struct AskRequest {
    pub query: String,
}

pub async fn ask_itinerary(
    State(state): State<Arc<AppState>>,
    Path((session_id, variant)): Path<(String, String)>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<GuideAnswer>, AppError> {
    let variant = parse_variant(&variant)?;
    let answer = planner::ask_itinerary(&state, &session_id, variant, &payload.query).await?;
    Ok(Json(answer))
}
