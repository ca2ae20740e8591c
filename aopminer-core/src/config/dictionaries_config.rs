//! Reference-file locations for the term dictionaries.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Paths to the static reference files the dictionaries are built from.
///
/// At least one of `adverse_outcome_path` / `disease_path` must be set for
/// AOD matching, and `key_event_path` for KE scoring. Missing files are a
/// fatal error at dictionary-build time, never at scan time.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DictionariesConfig {
    /// Adverse-outcome list (free-text lines, one phrase per line).
    pub adverse_outcome_path: Option<PathBuf>,
    /// Disease list (tab-separated, first column = phrase, `#` comments).
    pub disease_path: Option<PathBuf>,
    /// Key-event list (tab-separated, header row skipped).
    pub key_event_path: Option<PathBuf>,
    /// KE-relationship list (same shape as the key-event list).
    pub relationship_path: Option<PathBuf>,
}
