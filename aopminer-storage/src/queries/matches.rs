//! Term <-> record association rows.

use aopminer_core::errors::StorageError;
use rusqlite::{params, Connection};

/// Insert a disease/record association. Returns false if the pair
/// already exists, in which case nothing is written.
pub fn insert_disease_match(
    conn: &Connection,
    disease_id: i64,
    record_id: &str,
    last_index: i64,
    weight: f64,
) -> Result<bool, StorageError> {
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO disease_matches (disease_id, record_id, last_index, weight)
             VALUES (?1, ?2, ?3, ?4)",
            params![disease_id, record_id, last_index, weight],
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(inserted > 0)
}

/// Insert a key-event/record association. Returns false if the pair
/// already exists.
pub fn insert_key_event_match(
    conn: &Connection,
    key_event_id: i64,
    record_id: &str,
    score: f64,
) -> Result<bool, StorageError> {
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO key_event_matches (key_event_id, record_id, score)
             VALUES (?1, ?2, ?3)",
            params![key_event_id, record_id, score],
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(inserted > 0)
}

/// Total disease association rows.
pub fn count_disease_matches(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM disease_matches", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}

/// Total key-event association rows.
pub fn count_key_event_matches(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM key_event_matches", [], |row| {
        row.get(0)
    })
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}
