//! Persistent-store configuration.

use serde::{Deserialize, Serialize};

/// Settings for the SQLite store.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path.
    pub database_path: Option<String>,
    /// Read-pool size (default 4, max 8).
    pub read_pool_size: Option<usize>,
}
