//! Corpus-scan configuration.

use serde::{Deserialize, Serialize};

/// Settings for the parallel corpus scan.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Worker count for the matching pool (0 or absent = auto-detect,
    /// clamped to the host's available parallelism).
    pub parallelism: Option<usize>,
}
