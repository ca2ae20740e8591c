//! Abstract record storage with content-hash change detection.

use std::time::{SystemTime, UNIX_EPOCH};

use aopminer_core::errors::StorageError;
use aopminer_core::types::AbstractRecord;
use rusqlite::{params, Connection, OptionalExtension};

/// Outcome of an idempotent record upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordChange {
    Added,
    Updated,
    Unchanged,
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Insert or update a record, detecting changes via content hash.
/// An unchanged record is left untouched.
pub fn upsert_record(
    conn: &Connection,
    record: &AbstractRecord,
) -> Result<RecordChange, StorageError> {
    let hash = record.content_hash() as i64;

    let existing: Option<i64> = conn
        .query_row(
            "SELECT content_hash FROM abstract_records WHERE id = ?1",
            params![record.id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let effects_json =
        serde_json::to_string(&record.effects).map_err(|e| StorageError::SqliteError {
            message: format!("serialize effects: {e}"),
        })?;

    match existing {
        None => {
            conn.execute(
                "INSERT INTO abstract_records (id, abstract, target, effects, content_hash, ingested_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.id,
                    record.abstract_text,
                    record.target,
                    effects_json,
                    hash,
                    now_secs()
                ],
            )
            .map_err(|e| StorageError::SqliteError {
                message: e.to_string(),
            })?;
            Ok(RecordChange::Added)
        }
        Some(h) if h == hash => Ok(RecordChange::Unchanged),
        Some(_) => {
            conn.execute(
                "UPDATE abstract_records
                 SET abstract = ?2, target = ?3, effects = ?4, content_hash = ?5, ingested_at = ?6
                 WHERE id = ?1",
                params![
                    record.id,
                    record.abstract_text,
                    record.target,
                    effects_json,
                    hash,
                    now_secs()
                ],
            )
            .map_err(|e| StorageError::SqliteError {
                message: e.to_string(),
            })?;
            Ok(RecordChange::Updated)
        }
    }
}

fn map_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<AbstractRecord> {
    let effects_json: String = row.get(3)?;
    let effects: Vec<String> = serde_json::from_str(&effects_json).unwrap_or_default();
    Ok(AbstractRecord {
        id: row.get(0)?,
        abstract_text: row.get(1)?,
        target: row.get(2)?,
        effects,
    })
}

/// Fetch one record by id.
pub fn get_record(conn: &Connection, id: &str) -> Result<AbstractRecord, StorageError> {
    conn.query_row(
        "SELECT id, abstract, target, effects FROM abstract_records WHERE id = ?1",
        params![id],
        map_record,
    )
    .optional()
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?
    .ok_or_else(|| StorageError::RecordNotFound { id: id.to_string() })
}

/// All record ids, ordered for deterministic scan partitioning.
pub fn record_ids(conn: &Connection) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT id FROM abstract_records ORDER BY id")
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    let ids = stmt
        .query_map([], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?
        .collect::<Result<Vec<String>, _>>()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(ids)
}

/// Total number of stored records.
pub fn count_records(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM abstract_records", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}
