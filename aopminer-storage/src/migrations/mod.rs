//! Versioned migrations guarded by `PRAGMA user_version`.

pub mod v001_initial;

use aopminer_core::errors::StorageError;
use rusqlite::Connection;
use tracing::info;

/// All migrations in order. Index + 1 is the schema version.
const MIGRATIONS: &[&str] = &[v001_initial::MIGRATION_SQL];

/// Current schema version.
pub const SCHEMA_VERSION: i64 = MIGRATIONS.len() as i64;

/// Apply any pending migrations to the connection.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: format!("read user_version: {e}"),
        })?;

    for (idx, sql) in MIGRATIONS.iter().enumerate() {
        let version = idx as i64 + 1;
        if version <= current {
            continue;
        }
        conn.execute_batch(sql)
            .map_err(|e| StorageError::MigrationFailed {
                version,
                message: e.to_string(),
            })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| StorageError::MigrationFailed {
                version,
                message: e.to_string(),
            })?;
        info!(version, "applied schema migration");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);

        // All tables present.
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('abstract_records', 'diseases', 'key_events',
                              'disease_matches', 'key_event_matches', 'scan_history')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 6);
    }
}
