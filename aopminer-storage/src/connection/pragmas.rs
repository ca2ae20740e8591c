//! Connection pragmas applied to every database handle.

use aopminer_core::errors::StorageError;
use rusqlite::Connection;

/// Apply write-connection pragmas: WAL journal, NORMAL synchronous,
/// busy timeout, foreign keys ON.
pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA busy_timeout = 5000;
         PRAGMA foreign_keys = ON;",
    )
    .map_err(|e| StorageError::SqliteError {
        message: format!("apply pragmas: {e}"),
    })
}

/// Apply read-connection pragmas. Read connections share the WAL and
/// only need the busy timeout and foreign-key enforcement.
pub fn apply_read_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 5000;
         PRAGMA foreign_keys = ON;",
    )
    .map_err(|e| StorageError::SqliteError {
        message: format!("apply read pragmas: {e}"),
    })
}
