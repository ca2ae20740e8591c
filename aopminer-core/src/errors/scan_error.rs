//! Corpus scan errors.
//!
//! Per-record matching issues are never surfaced here — they are absorbed
//! as "absence of a result" and collected as strings in the scan report.
//! Only orchestration failures (storage, dictionaries, cancellation) reach
//! this enum.

use super::{DictionaryError, StorageError};

/// Errors that can occur during corpus scan orchestration.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Storage error during scan: {0}")]
    Storage(#[from] StorageError),

    #[error("Dictionary error during scan: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("Failed to build worker pool: {message}")]
    WorkerPool { message: String },

    #[error("Scan cancelled")]
    Cancelled,
}
