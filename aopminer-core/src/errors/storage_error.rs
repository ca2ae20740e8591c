//! Storage errors.

/// Errors that can occur in the SQLite persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration to version {version} failed: {message}")]
    MigrationFailed { version: i64, message: String },

    #[error("Record not found: {id}")]
    RecordNotFound { id: String },
}
