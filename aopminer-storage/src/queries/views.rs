//! Reporting views over corrected occurrence counters.
//!
//! Every listing here filters to `occurrence > 0` at query time: rows
//! whose counters were zeroed (or driven negative) by suroccurrence
//! correction stay in the tables but drop out of the reports.

use aopminer_core::errors::StorageError;
use rusqlite::{params, Connection};

use super::terms::{DiseaseRow, KeyEventRow};

/// A term/record association as presented in the reports. Disease
/// matches carry the stored position index; key-event matches do not.
#[derive(Debug, Clone)]
pub struct MatchView {
    pub record_id: String,
    pub term_name: String,
    pub value: f64,
    pub last_index: Option<i64>,
}

fn map_disease(row: &rusqlite::Row<'_>) -> rusqlite::Result<DiseaseRow> {
    Ok(DiseaseRow {
        id: row.get(0)?,
        name: row.get(1)?,
        occurrence: row.get(2)?,
    })
}

fn map_key_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<KeyEventRow> {
    Ok(KeyEventRow {
        id: row.get(0)?,
        event_id: row.get(1)?,
        name: row.get(2)?,
        origin: row.get(3)?,
        occurrence: row.get(4)?,
    })
}

fn collect_diseases(conn: &Connection, sql: &str) -> Result<Vec<DiseaseRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    let rows = stmt
        .query_map([], map_disease)
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(rows)
}

fn collect_key_events(conn: &Connection, sql: &str) -> Result<Vec<KeyEventRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    let rows = stmt
        .query_map([], map_key_event)
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(rows)
}

/// Diseases with at least one surviving occurrence, A to Z.
pub fn diseases_alphabetical(conn: &Connection) -> Result<Vec<DiseaseRow>, StorageError> {
    collect_diseases(
        conn,
        "SELECT id, name, occurrence FROM diseases
         WHERE occurrence > 0 ORDER BY name",
    )
}

/// Diseases with at least one surviving occurrence, most frequent first.
pub fn diseases_by_occurrence(conn: &Connection) -> Result<Vec<DiseaseRow>, StorageError> {
    collect_diseases(
        conn,
        "SELECT id, name, occurrence FROM diseases
         WHERE occurrence > 0 ORDER BY occurrence DESC, name",
    )
}

/// Key events with at least one surviving occurrence, A to Z by name.
pub fn key_events_alphabetical(conn: &Connection) -> Result<Vec<KeyEventRow>, StorageError> {
    collect_key_events(
        conn,
        "SELECT id, event_id, name, origin, occurrence FROM key_events
         WHERE occurrence > 0 ORDER BY name",
    )
}

/// Key events with at least one surviving occurrence, most frequent first.
pub fn key_events_by_occurrence(conn: &Connection) -> Result<Vec<KeyEventRow>, StorageError> {
    collect_key_events(
        conn,
        "SELECT id, event_id, name, origin, occurrence FROM key_events
         WHERE occurrence > 0 ORDER BY occurrence DESC, name",
    )
}

/// Distinct disease terms ever registered (corrected or not).
pub fn count_diseases(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM diseases", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}

/// Distinct key events ever registered.
pub fn count_key_events(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM key_events", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}

/// Total association rows across both match tables.
pub fn count_matches(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT (SELECT COUNT(*) FROM disease_matches)
              + (SELECT COUNT(*) FROM key_event_matches)",
        [],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}

/// Records associated with a disease, with position weight.
pub fn matches_for_disease(
    conn: &Connection,
    name: &str,
) -> Result<Vec<MatchView>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT m.record_id, d.name, m.weight, m.last_index
             FROM disease_matches m
             JOIN diseases d ON d.id = m.disease_id
             WHERE d.name = ?1
             ORDER BY m.record_id",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    let rows = stmt
        .query_map(params![name], |row| {
            Ok(MatchView {
                record_id: row.get(0)?,
                term_name: row.get(1)?,
                value: row.get(2)?,
                last_index: Some(row.get(3)?),
            })
        })
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(rows)
}

/// Records associated with a key event, with plausibility score.
pub fn matches_for_key_event(
    conn: &Connection,
    event_id: &str,
) -> Result<Vec<MatchView>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT m.record_id, k.name, m.score
             FROM key_event_matches m
             JOIN key_events k ON k.id = m.key_event_id
             WHERE k.event_id = ?1
             ORDER BY m.record_id",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    let rows = stmt
        .query_map(params![event_id], |row| {
            Ok(MatchView {
                record_id: row.get(0)?,
                term_name: row.get(1)?,
                value: row.get(2)?,
                last_index: None,
            })
        })
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(rows)
}

/// All term associations for one record: diseases first, then key events.
pub fn matches_for_record(
    conn: &Connection,
    record_id: &str,
) -> Result<Vec<MatchView>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT m.record_id, d.name, m.weight, m.last_index
             FROM disease_matches m
             JOIN diseases d ON d.id = m.disease_id
             WHERE m.record_id = ?1
             UNION ALL
             SELECT m.record_id, k.name, m.score, NULL
             FROM key_event_matches m
             JOIN key_events k ON k.id = m.key_event_id
             WHERE m.record_id = ?1",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    let rows = stmt
        .query_map(params![record_id], |row| {
            Ok(MatchView {
                record_id: row.get(0)?,
                term_name: row.get(1)?,
                value: row.get(2)?,
                last_index: row.get(3)?,
            })
        })
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(rows)
}
