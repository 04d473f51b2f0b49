use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{DerivedSummary, Session, Variant};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Sessions ──

pub fn create_session(conn: &Connection, session: &Session) -> anyhow::Result<()> {
    let created_at = session.created_at.format(TIMESTAMP_FORMAT).to_string();
    let start_date = session.start_date.map(|d| d.format("%Y-%m-%d").to_string());

    conn.execute(
        "INSERT INTO sessions (id, destination, budget, days, start_date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            session.id,
            session.destination,
            session.budget,
            session.days,
            start_date,
            created_at,
        ],
    )?;
    Ok(())
}

pub fn get_session(conn: &Connection, id: &str) -> anyhow::Result<Option<Session>> {
    let row = conn
        .query_row(
            "SELECT id, destination, budget, days, start_date, created_at FROM sessions WHERE id = ?1",
            params![id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, u32>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, String>(5)?,
                ))
            },
        )
        .optional()?;

    let Some((id, destination, budget, days, start_date, created_at)) = row else {
        return Ok(None);
    };

    let start_date = start_date
        .map(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d"))
        .transpose()
        .with_context(|| format!("invalid start_date for session {id}"))?;
    let created_at = NaiveDateTime::parse_from_str(&created_at, TIMESTAMP_FORMAT)
        .with_context(|| format!("invalid created_at {created_at:?} for session {id}"))?;

    Ok(Some(Session {
        id,
        destination,
        budget,
        days,
        start_date,
        created_at,
    }))
}

// ── Itineraries ──

/// Upserts the narrative and its summary for one variant; last write wins.
pub fn save_itinerary(
    conn: &Connection,
    session_id: &str,
    summary: &DerivedSummary,
) -> anyhow::Result<()> {
    let summary_json = serde_json::to_string(summary)?;
    let now = Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string();

    conn.execute(
        "INSERT INTO itineraries (session_id, variant, narrative, summary, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(session_id, variant) DO UPDATE SET
           narrative = excluded.narrative,
           summary = excluded.summary,
           updated_at = excluded.updated_at",
        params![
            session_id,
            summary.variant.as_str(),
            summary.full_itinerary,
            summary_json,
            now,
        ],
    )?;
    Ok(())
}

pub fn get_summary(
    conn: &Connection,
    session_id: &str,
    variant: Variant,
) -> anyhow::Result<Option<DerivedSummary>> {
    let summary_json: Option<String> = conn
        .query_row(
            "SELECT summary FROM itineraries WHERE session_id = ?1 AND variant = ?2",
            params![session_id, variant.as_str()],
            |row| row.get(0),
        )
        .optional()?;

    match summary_json {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

pub fn get_narrative(
    conn: &Connection,
    session_id: &str,
    variant: Variant,
) -> anyhow::Result<Option<String>> {
    let narrative = conn
        .query_row(
            "SELECT narrative FROM itineraries WHERE session_id = ?1 AND variant = ?2",
            params![session_id, variant.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(narrative)
}

/// Summaries for a session in standard, budget, luxury order.
pub fn list_summaries(conn: &Connection, session_id: &str) -> anyhow::Result<Vec<DerivedSummary>> {
    let mut stmt = conn.prepare(
        "SELECT summary FROM itineraries WHERE session_id = ?1
         ORDER BY CASE variant WHEN 'standard' THEN 0 WHEN 'budget' THEN 1 ELSE 2 END",
    )?;

    let rows = stmt.query_map(params![session_id], |row| row.get::<_, String>(0))?;

    let mut summaries = vec![];
    for row in rows {
        summaries.push(serde_json::from_str(&row?)?);
    }
    Ok(summaries)
}
