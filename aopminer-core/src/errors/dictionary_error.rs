//! Term dictionary errors.
//!
//! Dictionary failures are fatal: the reference files are required shared
//! state, so a missing or unreadable file aborts the run before scanning.

/// Errors that can occur while building the term dictionaries.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("Reference file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read reference file {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Reference file {path} produced no usable entries")]
    Empty { path: String },
}
