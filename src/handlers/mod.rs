pub mod health;
pub mod parse;
pub mod trips;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/parse/days", post(parse::parse_days))
        .route("/api/parse/summary", post(parse::parse_summary))
        .route("/api/trips", post(trips::create_trip))
        .route("/api/trips/:session_id", get(trips::get_trip))
        .route("/api/trips/:session_id/:variant", get(trips::get_itinerary))
        .route(
            "/api/trips/:session_id/:variant/edit",
            post(trips::edit_itinerary),
        )
        .route(
            "/api/trips/:session_id/:variant/ask",
            post(trips::ask_itinerary),
        )
        .with_state(state)
}
