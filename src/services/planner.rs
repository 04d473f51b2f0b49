use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{DerivedSummary, ItineraryDetails, Session, TripRequest, Variant};
use crate::parser::synthesize_summary;
use crate::services::ai::narrative;
use crate::services::details::build_details;
use crate::services::edit_gate::EditRejection;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripOverview {
    pub session_id: String,
    pub itineraries: Vec<DerivedSummary>,
}

#[derive(Debug, Serialize)]
pub struct GuideAnswer {
    pub query: String,
    pub answer: serde_json::Value,
}

#[derive(Debug)]
pub enum EditOutcome {
    Accepted(DerivedSummary),
    Rejected(EditRejection),
}

/// Opens a session and generates, summarizes and stores every variant.
pub async fn create_trip(
    state: &Arc<AppState>,
    request: TripRequest,
) -> Result<TripOverview, AppError> {
    let request = request.normalized();
    if request.destination.is_empty() {
        return Err(AppError::Validation("destination is required".to_string()));
    }

    let session = Session {
        id: uuid::Uuid::new_v4().to_string(),
        destination: request.destination.clone(),
        budget: request.budget,
        days: request.days,
        start_date: request.start_date,
        created_at: Utc::now().naive_utc(),
    };

    {
        let db = state.conn()?;
        queries::create_session(&db, &session).map_err(AppError::Database)?;
    }

    tracing::info!(
        session_id = %session.id,
        destination = %session.destination,
        days = session.days,
        "generating itineraries"
    );

    let mut itineraries = Vec::with_capacity(Variant::ALL.len());
    for variant in Variant::ALL {
        let text = narrative::generate_narrative(state.llm.as_ref(), &request, variant)
            .await
            .map_err(AppError::Ai)?;

        let summary = synthesize_summary(&text, variant, &request.destination, request.budget);
        tracing::info!(
            session_id = %session.id,
            variant = %variant,
            days = summary.days,
            highlights = summary.highlights.len(),
            "itinerary generated"
        );

        {
            let db = state.conn()?;
            queries::save_itinerary(&db, &session.id, &summary).map_err(AppError::Database)?;
        }
        itineraries.push(summary);
    }

    Ok(TripOverview {
        session_id: session.id,
        itineraries,
    })
}

pub fn get_overview(state: &AppState, session_id: &str) -> Result<TripOverview, AppError> {
    let db = state.conn()?;
    load_session(&db, session_id)?;
    let itineraries = queries::list_summaries(&db, session_id).map_err(AppError::Database)?;
    Ok(TripOverview {
        session_id: session_id.to_string(),
        itineraries,
    })
}

/// Start date precedence: explicit argument, the session's start date, today.
pub fn get_details(
    state: &AppState,
    session_id: &str,
    variant: Variant,
    start: Option<NaiveDate>,
) -> Result<ItineraryDetails, AppError> {
    let (session, summary) = {
        let db = state.conn()?;
        let session = load_session(&db, session_id)?;
        (session, load_summary(&db, session_id, variant)?)
    };

    let start = start
        .or(session.start_date)
        .unwrap_or_else(|| Utc::now().date_naive());
    Ok(build_details(&summary, start))
}

/// Sends an edit request for one variant and stores the reply if the gate accepts it.
pub async fn edit_itinerary(
    state: &Arc<AppState>,
    session_id: &str,
    variant: Variant,
    instruction: &str,
) -> Result<EditOutcome, AppError> {
    if instruction.trim().is_empty() {
        return Err(AppError::Validation("instruction is required".to_string()));
    }

    let (session, current) = {
        let db = state.conn()?;
        let session = load_session(&db, session_id)?;
        let current = queries::get_narrative(&db, session_id, variant)
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("{variant} itinerary for {session_id}")))?;
        (session, current)
    };

    let candidate = narrative::request_edit(state.llm.as_ref(), &current, instruction)
        .await
        .map_err(AppError::Ai)?;

    if let Err(reason) = state.edit_gate().check(&current, &candidate) {
        tracing::warn!(
            session_id,
            variant = %variant,
            reason = %reason,
            "rejected itinerary edit"
        );
        return Ok(EditOutcome::Rejected(reason));
    }

    let summary = synthesize_summary(&candidate, variant, &session.destination, session.budget);
    {
        let db = state.conn()?;
        queries::save_itinerary(&db, session_id, &summary).map_err(AppError::Database)?;
    }
    tracing::info!(session_id, variant = %variant, "itinerary edit applied");

    Ok(EditOutcome::Accepted(summary))
}

/// Answers a question about one stored variant. Storage is read, never written.
pub async fn ask_itinerary(
    state: &Arc<AppState>,
    session_id: &str,
    variant: Variant,
    query: &str,
) -> Result<GuideAnswer, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("query is required".to_string()));
    }

    let narrative = {
        let db = state.conn()?;
        load_session(&db, session_id)?;
        queries::get_narrative(&db, session_id, variant)
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("{variant} itinerary for {session_id}")))?
    };

    let answer = narrative::answer_question(state.llm.as_ref(), &narrative, query)
        .await
        .map_err(AppError::Ai)?;
    tracing::info!(session_id, variant = %variant, "answered itinerary question");

    Ok(GuideAnswer {
        query: query.to_string(),
        answer,
    })
}

fn load_session(db: &rusqlite::Connection, session_id: &str) -> Result<Session, AppError> {
    queries::get_session(db, session_id)
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("session {session_id}")))
}

fn load_summary(
    db: &rusqlite::Connection,
    session_id: &str,
    variant: Variant,
) -> Result<DerivedSummary, AppError> {
    queries::get_summary(db, session_id, variant)
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("{variant} itinerary for {session_id}")))
}
