//! Persist scan outcomes: association rows plus occurrence counters,
//! all inside one IMMEDIATE transaction so a batch lands atomically.

use aopminer_core::errors::StorageError;
use aopminer_core::types::RecordOutcome;
use tracing::debug;

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::{matches, terms};

/// What a persistence batch actually wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistReport {
    /// New disease association rows (occurrences counted).
    pub disease_matches_inserted: usize,
    /// New key-event association rows (occurrences counted).
    pub key_event_matches_inserted: usize,
    /// Pairs skipped because the association already existed.
    pub duplicates_skipped: usize,
}

/// Write a batch of record outcomes to the database.
///
/// For each matched term the display name is resolved to a row id
/// (created on first sight), then the (term, record) association is
/// inserted. The occurrence counter is bumped only when the association
/// is new, so re-scanning the same corpus never inflates counts.
pub fn persist_outcomes(
    db: &DatabaseManager,
    outcomes: &[RecordOutcome],
) -> Result<PersistReport, StorageError> {
    db.with_writer(|conn| {
        with_immediate_transaction(conn, |tx| {
            let mut report = PersistReport::default();

            for outcome in outcomes {
                for m in &outcome.aod_matches {
                    let disease_id = terms::get_or_create_disease(tx, &m.name)?;
                    let inserted = matches::insert_disease_match(
                        tx,
                        disease_id,
                        &outcome.record_id,
                        m.last_index as i64,
                        m.weight(),
                    )?;
                    if inserted {
                        terms::bump_disease_occurrence(tx, disease_id, 1)?;
                        report.disease_matches_inserted += 1;
                    } else {
                        report.duplicates_skipped += 1;
                    }
                }

                for m in &outcome.ke_matches {
                    let key_event_id = terms::get_or_create_key_event(
                        tx,
                        &m.event_id,
                        &m.name,
                        m.origin.as_str(),
                    )?;
                    let inserted = matches::insert_key_event_match(
                        tx,
                        key_event_id,
                        &outcome.record_id,
                        m.score,
                    )?;
                    if inserted {
                        terms::bump_key_event_occurrence(tx, key_event_id, 1)?;
                        report.key_event_matches_inserted += 1;
                    } else {
                        report.duplicates_skipped += 1;
                    }
                }
            }

            debug!(
                disease_matches = report.disease_matches_inserted,
                key_event_matches = report.key_event_matches_inserted,
                duplicates = report.duplicates_skipped,
                "persisted scan outcomes"
            );

            Ok(report)
        })
    })
}
