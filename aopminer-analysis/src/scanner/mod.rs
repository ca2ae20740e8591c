//! Parallel corpus scanner.
//!
//! Dispatches one matching task per abstract record over a fixed-size
//! rayon pool. Workers are read-only: each re-reads its record through
//! the storage read pool, runs the matchers against the shared
//! dictionaries, and sends its outcome back over a channel. Per-record
//! failures are absorbed into the report; only storage, dictionary, and
//! cancellation failures abort the scan.

pub mod report;

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use aopminer_core::errors::{ScanError, StorageError};
use aopminer_core::traits::{Cancellable, CancellationToken};
use aopminer_core::types::collections::FxHashSet;
use aopminer_core::types::{DrivingField, KeMatch, RecordOutcome};
use aopminer_storage::queries::{records, scan_history};
use aopminer_storage::DatabaseManager;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::dictionary::aod::AodIndex;
use crate::dictionary::key_events::KeEntry;
use crate::matchers::{aod, key_event};
use crate::normalize::Normalizer;

pub use report::ScanReport;

/// Scans the whole record store against the term dictionaries.
pub struct CorpusScanner {
    dictionary: AodIndex,
    key_events: Vec<KeEntry>,
    normalizer: Normalizer,
    parallelism: Option<usize>,
}

impl CorpusScanner {
    /// Scanner with the Snowball English normalizer and auto-detected
    /// parallelism.
    pub fn new(dictionary: AodIndex, key_events: Vec<KeEntry>) -> Self {
        Self {
            dictionary,
            key_events,
            normalizer: Normalizer::english(),
            parallelism: None,
        }
    }

    /// Override the worker count (0 or None = auto-detect). Values above
    /// the host's available parallelism are clamped.
    pub fn with_parallelism(mut self, parallelism: Option<usize>) -> Self {
        self.parallelism = parallelism;
        self
    }

    fn effective_parallelism(&self) -> usize {
        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        match self.parallelism {
            Some(n) if n > 0 => n.min(available),
            _ => available,
        }
    }

    /// Scan every stored record. Records a scan-history row; cancellation
    /// aborts between records, before any persistence.
    pub fn scan(
        &self,
        db: &DatabaseManager,
        token: &CancellationToken,
    ) -> Result<ScanReport, ScanError> {
        let scan_id = db.with_writer(scan_history::insert_scan_start)?;

        match self.run(db, token) {
            Ok(report) => {
                db.with_writer(|conn| {
                    scan_history::update_scan_complete(
                        conn,
                        scan_id,
                        (report.records_scanned + report.records_failed) as i64,
                        report.records_matched as i64,
                        report.records_unmatched() as i64,
                        report.records_failed as i64,
                        report.duration.as_millis() as i64,
                    )
                })?;
                Ok(report)
            }
            Err(e) => {
                // Best effort: the scan error is the one worth returning.
                let _ = db
                    .with_writer(|conn| scan_history::update_scan_failed(conn, scan_id, &e.to_string()));
                Err(e)
            }
        }
    }

    fn run(&self, db: &DatabaseManager, token: &CancellationToken) -> Result<ScanReport, ScanError> {
        let start = Instant::now();
        let ids = db.with_reader(records::record_ids)?;

        // KE token sets are derived once, before the parallel phase.
        let ke_tokens: Vec<(usize, Vec<String>)> = self
            .key_events
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| {
                let tokens = key_event::event_tokens(&self.normalizer, &entry.description);
                if tokens.is_empty() {
                    None
                } else {
                    Some((idx, tokens))
                }
            })
            .collect();

        info!(
            records = ids.len(),
            dictionary_entries = self.dictionary.len(),
            key_events = ke_tokens.len(),
            workers = self.effective_parallelism(),
            "corpus scan started"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.effective_parallelism())
            .build()
            .map_err(|e| ScanError::WorkerPool {
                message: e.to_string(),
            })?;

        let (tx, rx) = crossbeam_channel::unbounded();
        let errors: Mutex<Vec<String>> = Mutex::new(Vec::new());
        let scanned = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);
        let matched = AtomicUsize::new(0);

        let dispatch = pool.install(|| {
            ids.par_iter().try_for_each(|id| {
                if token.is_cancelled() {
                    return Err(ScanError::Cancelled);
                }
                match self.scan_record(db, id, &ke_tokens) {
                    Ok(outcome) => {
                        scanned.fetch_add(1, Ordering::Relaxed);
                        if !outcome.is_empty() {
                            matched.fetch_add(1, Ordering::Relaxed);
                            let _ = tx.send(outcome);
                        }
                    }
                    Err(e) => {
                        failed.fetch_add(1, Ordering::Relaxed);
                        warn!(record_id = %id, error = %e, "record scan failed");
                        if let Ok(mut guard) = errors.lock() {
                            guard.push(format!("{id}: {e}"));
                        }
                    }
                }
                Ok(())
            })
        });
        drop(tx);
        dispatch?;

        let outcomes: Vec<RecordOutcome> = rx.try_iter().collect();
        let disease_matches = outcomes.iter().map(|o| o.aod_matches.len()).sum();
        let key_event_matches = outcomes.iter().map(|o| o.ke_matches.len()).sum();

        let report = ScanReport {
            outcomes,
            records_scanned: scanned.load(Ordering::Relaxed),
            records_matched: matched.load(Ordering::Relaxed),
            records_failed: failed.load(Ordering::Relaxed),
            disease_matches,
            key_event_matches,
            errors: errors.into_inner().unwrap_or_default(),
            duration: start.elapsed(),
        };

        info!(
            records_scanned = report.records_scanned,
            records_matched = report.records_matched,
            disease_matches = report.disease_matches,
            key_event_matches = report.key_event_matches,
            failed = report.records_failed,
            duration_ms = report.duration.as_millis() as u64,
            "corpus scan finished"
        );

        Ok(report)
    }

    /// Match one record. The driving field decides the path: free-text
    /// abstracts get boundary matching and per-sentence KE scoring;
    /// target/effect phrases get token membership and whole-phrase
    /// scoring.
    fn scan_record(
        &self,
        db: &DatabaseManager,
        id: &str,
        ke_tokens: &[(usize, Vec<String>)],
    ) -> Result<RecordOutcome, StorageError> {
        let record = db.with_reader(|conn| records::get_record(conn, id))?;
        let mut outcome = RecordOutcome::new(id);

        match record.driving_field() {
            DrivingField::Abstract(text) => {
                let sentences = self.normalizer.sentences(text);
                let joined = join_sentences(&sentences);
                outcome.aod_matches = aod::match_abstract(&self.dictionary, &joined);
                self.score_key_events(&mut outcome, ke_tokens, &sentences);
            }
            DrivingField::Target(target) => {
                let stemmed = self.normalizer.stem_tokens(target);
                outcome.aod_matches = aod::match_tokens(&self.dictionary, &stemmed);
                let words: Vec<String> = self
                    .normalizer
                    .joined(target)
                    .split_whitespace()
                    .map(str::to_string)
                    .collect();
                self.score_key_events(&mut outcome, ke_tokens, std::slice::from_ref(&words));
            }
            DrivingField::Effects(effects) => {
                let mut seen: FxHashSet<String> = FxHashSet::default();
                let mut effect_words = Vec::with_capacity(effects.len());
                for effect in effects {
                    let stemmed = self.normalizer.stem_tokens(effect);
                    for m in aod::match_tokens(&self.dictionary, &stemmed) {
                        if seen.insert(m.name.clone()) {
                            outcome.aod_matches.push(m);
                        }
                    }
                    let words: Vec<String> = self
                        .normalizer
                        .joined(effect)
                        .split_whitespace()
                        .map(str::to_string)
                        .collect();
                    effect_words.push(words);
                }
                self.score_key_events(&mut outcome, ke_tokens, &effect_words);
            }
            DrivingField::None => {}
        }

        Ok(outcome)
    }

    fn score_key_events(
        &self,
        outcome: &mut RecordOutcome,
        ke_tokens: &[(usize, Vec<String>)],
        word_groups: &[Vec<String>],
    ) {
        for (idx, tokens) in ke_tokens {
            if let Some(score) = key_event::score_sentences(tokens, word_groups) {
                let entry = &self.key_events[*idx];
                outcome.ke_matches.push(KeMatch {
                    event_id: entry.id.clone(),
                    name: entry.description.clone(),
                    origin: entry.origin,
                    score,
                });
            }
        }
    }
}

// The normalizer's boxed stemmer has no Debug; summarize by size.
impl fmt::Debug for CorpusScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorpusScanner")
            .field("dictionary_entries", &self.dictionary.len())
            .field("key_events", &self.key_events.len())
            .field("parallelism", &self.parallelism)
            .finish()
    }
}

/// Flatten per-sentence token lists back into the space-joined form the
/// substring matcher works on.
fn join_sentences(sentences: &[Vec<String>]) -> String {
    let mut out = String::new();
    for sentence in sentences {
        for token in sentence {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(token);
        }
    }
    out
}
