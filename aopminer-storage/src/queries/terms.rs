//! Disease and key-event term rows: lookup, creation, occurrence counters.

use aopminer_core::errors::StorageError;
use rusqlite::{params, Connection, OptionalExtension};

/// A disease (adverse outcome) row.
#[derive(Debug, Clone)]
pub struct DiseaseRow {
    pub id: i64,
    pub name: String,
    pub occurrence: i64,
}

/// A key-event row, tagged with the reference file it came from.
#[derive(Debug, Clone)]
pub struct KeyEventRow {
    pub id: i64,
    pub event_id: String,
    pub name: String,
    pub origin: String,
    pub occurrence: i64,
}

/// Look up a disease id by name, inserting the row if absent.
pub fn get_or_create_disease(conn: &Connection, name: &str) -> Result<i64, StorageError> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM diseases WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    if let Some(id) = existing {
        return Ok(id);
    }
    conn.execute(
        "INSERT INTO diseases (name, occurrence) VALUES (?1, 0)",
        params![name],
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    Ok(conn.last_insert_rowid())
}

/// Look up a key-event id by its reference id, inserting the row if absent.
pub fn get_or_create_key_event(
    conn: &Connection,
    event_id: &str,
    name: &str,
    origin: &str,
) -> Result<i64, StorageError> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM key_events WHERE event_id = ?1",
            params![event_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    if let Some(id) = existing {
        return Ok(id);
    }
    conn.execute(
        "INSERT INTO key_events (event_id, name, origin, occurrence) VALUES (?1, ?2, ?3, 0)",
        params![event_id, name, origin],
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    Ok(conn.last_insert_rowid())
}

/// Add a delta to a disease occurrence counter.
pub fn bump_disease_occurrence(
    conn: &Connection,
    id: i64,
    delta: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE diseases SET occurrence = occurrence + ?2 WHERE id = ?1",
        params![id, delta],
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    Ok(())
}

/// Add a delta to a key-event occurrence counter.
pub fn bump_key_event_occurrence(
    conn: &Connection,
    id: i64,
    delta: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE key_events SET occurrence = occurrence + ?2 WHERE id = ?1",
        params![id, delta],
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    Ok(())
}

/// Snapshot of all disease rows, ordered by id (insertion order).
pub fn all_diseases(conn: &Connection) -> Result<Vec<DiseaseRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT id, name, occurrence FROM diseases ORDER BY id")
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    let rows = stmt
        .query_map([], |row| {
            Ok(DiseaseRow {
                id: row.get(0)?,
                name: row.get(1)?,
                occurrence: row.get(2)?,
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

/// Snapshot of all key-event rows, ordered by id (insertion order).
pub fn all_key_events(conn: &Connection) -> Result<Vec<KeyEventRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, event_id, name, origin, occurrence FROM key_events ORDER BY id",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    let rows = stmt
        .query_map([], |row| {
            Ok(KeyEventRow {
                id: row.get(0)?,
                event_id: row.get(1)?,
                name: row.get(2)?,
                origin: row.get(3)?,
                occurrence: row.get(4)?,
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

/// Overwrite a disease occurrence with an absolute value.
pub fn set_disease_occurrence(conn: &Connection, id: i64, value: i64) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE diseases SET occurrence = ?2 WHERE id = ?1",
        params![id, value],
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    Ok(())
}

/// Overwrite a key-event occurrence with an absolute value.
pub fn set_key_event_occurrence(
    conn: &Connection,
    id: i64,
    value: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE key_events SET occurrence = ?2 WHERE id = ?1",
        params![id, value],
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    Ok(())
}
