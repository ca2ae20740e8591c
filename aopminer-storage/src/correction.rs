//! Suroccurrence correction.
//!
//! When one term's name is a substring of a later term's name (e.g.
//! "fibrosis" inside "liver fibrosis"), every hit on the longer term
//! also counted once for the shorter one. The correction subtracts the
//! longer term's occurrence from the shorter term's, using a snapshot
//! of the counters taken before any update so the result does not
//! depend on processing order.

use aopminer_core::errors::StorageError;
use tracing::info;

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::terms;

/// What a correction pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionReport {
    /// Disease rows whose counter was adjusted.
    pub diseases_adjusted: usize,
    /// Key-event rows whose counter was adjusted.
    pub key_events_adjusted: usize,
}

/// Snapshot-based substring adjustment over (name, occurrence) pairs.
/// Returns (index, corrected value) for each row that changed.
fn corrected_counts(rows: &[(String, i64)]) -> Vec<(usize, i64)> {
    let mut adjusted = Vec::new();
    for i in 0..rows.len() {
        let mut value = rows[i].1;
        // Only rows registered later count as containers; the pass is
        // ordered, not symmetric.
        for (name_j, occ_j) in rows.iter().skip(i + 1) {
            if name_j.contains(rows[i].0.as_str()) {
                value -= occ_j;
            }
        }
        if value != rows[i].1 {
            adjusted.push((i, value));
        }
    }
    adjusted
}

/// Apply suroccurrence correction to both diseases and key events,
/// in one transaction.
pub fn apply_suroccurrence_correction(
    db: &DatabaseManager,
) -> Result<CorrectionReport, StorageError> {
    db.with_writer(|conn| {
        with_immediate_transaction(conn, |tx| {
            let mut report = CorrectionReport::default();

            let diseases = terms::all_diseases(tx)?;
            let snapshot: Vec<(String, i64)> = diseases
                .iter()
                .map(|d| (d.name.clone(), d.occurrence))
                .collect();
            for (idx, value) in corrected_counts(&snapshot) {
                terms::set_disease_occurrence(tx, diseases[idx].id, value)?;
                report.diseases_adjusted += 1;
            }

            let key_events = terms::all_key_events(tx)?;
            let snapshot: Vec<(String, i64)> = key_events
                .iter()
                .map(|k| (k.name.clone(), k.occurrence))
                .collect();
            for (idx, value) in corrected_counts(&snapshot) {
                terms::set_key_event_occurrence(tx, key_events[idx].id, value)?;
                report.key_events_adjusted += 1;
            }

            info!(
                diseases = report.diseases_adjusted,
                key_events = report.key_events_adjusted,
                "applied suroccurrence correction"
            );

            Ok(report)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_subtracts_snapshot_value() {
        // A term registered later never corrects an earlier one, even
        // when the names overlap.
        let rows = vec![
            ("liver fibrosis".to_string(), 5),
            ("fibrosis".to_string(), 5),
        ];
        assert_eq!(corrected_counts(&rows), vec![]);

        // Reversed registration order: every "liver fibrosis" hit also
        // counted for "fibrosis", so the head's counter drops to zero.

        let rows = vec![
            ("fibrosis".to_string(), 5),
            ("liver fibrosis".to_string(), 5),
        ];
        assert_eq!(corrected_counts(&rows), vec![(0, 0)]);
    }

    #[test]
    fn test_multiple_containers_all_subtract() {
        let rows = vec![
            ("fibrosis".to_string(), 10),
            ("liver fibrosis".to_string(), 3),
            ("renal fibrosis".to_string(), 4),
        ];
        assert_eq!(corrected_counts(&rows), vec![(0, 3)]);
    }

    #[test]
    fn test_snapshot_prevents_cascade() {
        // b contains a, c contains b (and a). All three adjust against
        // the snapshot, not against already-corrected values.
        let rows = vec![
            ("stress".to_string(), 9),
            ("oxidative stress".to_string(), 6),
            ("severe oxidative stress".to_string(), 2),
        ];
        // stress: 9 - 6 - 2 = 1; oxidative stress: 6 - 2 = 4.
        assert_eq!(corrected_counts(&rows), vec![(0, 1), (1, 4)]);
    }

    #[test]
    fn test_counters_can_go_negative() {
        let rows = vec![
            ("a".to_string(), 1),
            ("aa".to_string(), 3),
        ];
        assert_eq!(corrected_counts(&rows), vec![(0, -2)]);
    }
}
