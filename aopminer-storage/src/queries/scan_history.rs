//! Scan history: append-only log of corpus scans.

use std::time::{SystemTime, UNIX_EPOCH};

use aopminer_core::errors::StorageError;
use rusqlite::{params, Connection};

/// A completed or in-flight scan row.
#[derive(Debug, Clone)]
pub struct ScanHistoryRow {
    pub id: i64,
    pub started_at: i64,
    pub completed_at: Option<i64>,
    pub total_records: Option<i64>,
    pub matched_records: Option<i64>,
    pub unmatched_records: Option<i64>,
    pub failed_records: Option<i64>,
    pub duration_ms: Option<i64>,
    pub status: String,
    pub error: Option<String>,
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Record the start of a scan, returning the history row id.
pub fn insert_scan_start(conn: &Connection) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO scan_history (started_at, status) VALUES (?1, 'running')",
        params![now_secs()],
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    Ok(conn.last_insert_rowid())
}

/// Mark a scan as completed with its final counters.
pub fn update_scan_complete(
    conn: &Connection,
    scan_id: i64,
    total_records: i64,
    matched_records: i64,
    unmatched_records: i64,
    failed_records: i64,
    duration_ms: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE scan_history
         SET completed_at = ?2, total_records = ?3, matched_records = ?4,
             unmatched_records = ?5, failed_records = ?6, duration_ms = ?7,
             status = 'completed'
         WHERE id = ?1",
        params![
            scan_id,
            now_secs(),
            total_records,
            matched_records,
            unmatched_records,
            failed_records,
            duration_ms
        ],
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    Ok(())
}

/// Mark a scan as failed (or cancelled) with a reason.
pub fn update_scan_failed(
    conn: &Connection,
    scan_id: i64,
    error: &str,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE scan_history
         SET completed_at = ?2, status = 'failed', error = ?3
         WHERE id = ?1",
        params![scan_id, now_secs(), error],
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    Ok(())
}

/// Most recent scans, newest first.
pub fn query_recent(conn: &Connection, limit: usize) -> Result<Vec<ScanHistoryRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, started_at, completed_at, total_records, matched_records,
                    unmatched_records, failed_records, duration_ms, status, error
             FROM scan_history
             ORDER BY started_at DESC, id DESC
             LIMIT ?1",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(ScanHistoryRow {
                id: row.get(0)?,
                started_at: row.get(1)?,
                completed_at: row.get(2)?,
                total_records: row.get(3)?,
                matched_records: row.get(4)?,
                unmatched_records: row.get(5)?,
                failed_records: row.get(6)?,
                duration_ms: row.get(7)?,
                status: row.get(8)?,
                error: row.get(9)?,
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

/// Total scans ever recorded.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM scan_history", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}
