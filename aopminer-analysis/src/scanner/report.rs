//! Scan outcome summary.

use std::time::Duration;

use aopminer_core::types::RecordOutcome;
use serde::Serialize;

/// What a corpus scan found. The outcomes carry everything needed for
/// persistence; the counters summarize the run for logging and the scan
/// history table.
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    /// Per-record match sets, only for records with at least one match.
    pub outcomes: Vec<RecordOutcome>,
    /// Records processed without error.
    pub records_scanned: usize,
    /// Records with at least one match.
    pub records_matched: usize,
    /// Records whose processing failed (errors absorbed below).
    pub records_failed: usize,
    /// Total disease matches across all records.
    pub disease_matches: usize,
    /// Total key-event matches across all records.
    pub key_event_matches: usize,
    /// Absorbed per-record error descriptions.
    pub errors: Vec<String>,
    /// Wall-clock duration of the scan.
    pub duration: Duration,
}

impl ScanReport {
    /// Records that were scanned but matched nothing.
    pub fn records_unmatched(&self) -> usize {
        self.records_scanned.saturating_sub(self.records_matched)
    }
}
