//! End-to-end mining pass: scan, persist, correct.
//!
//! Fatal failures (configuration, dictionaries, storage, cancellation)
//! propagate as `PipelineError`; per-record failures absorbed during the
//! scan come back as strings on the `PipelineResult`.

use aopminer_core::config::MinerConfig;
use aopminer_core::errors::{ConfigError, PipelineError, PipelineResult};
use aopminer_core::traits::CancellationToken;
use aopminer_storage::{apply_suroccurrence_correction, persist_outcomes, DatabaseManager};
use tracing::info;

use crate::dictionary::aod::{AodIndex, AodSource};
use crate::dictionary::key_events::load_key_event_data;
use crate::normalize::Normalizer;
use crate::scanner::CorpusScanner;

/// Totals from one full mining pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub records_scanned: usize,
    pub records_matched: usize,
    pub disease_matches_inserted: usize,
    pub key_event_matches_inserted: usize,
    pub diseases_adjusted: usize,
    pub key_events_adjusted: usize,
    pub duration_ms: u64,
}

/// Build a scanner from resolved configuration: load and merge the AOD
/// dictionaries (disease entries take precedence on key collision),
/// load key events plus relationships, wire the parallelism setting.
pub fn scanner_from_config(config: &MinerConfig) -> Result<CorpusScanner, PipelineError> {
    let normalizer = Normalizer::english();
    let dicts = &config.dictionaries;

    let dictionary = match (&dicts.adverse_outcome_path, &dicts.disease_path) {
        (Some(ao), Some(d)) => {
            let mut index = AodIndex::load(ao, AodSource::AdverseOutcome, &normalizer)?;
            index.merge(AodIndex::load(d, AodSource::Disease, &normalizer)?);
            index
        }
        (Some(ao), None) => AodIndex::load(ao, AodSource::AdverseOutcome, &normalizer)?,
        (None, Some(d)) => AodIndex::load(d, AodSource::Disease, &normalizer)?,
        (None, None) => {
            return Err(ConfigError::ValidationFailed {
                field: "dictionaries".to_string(),
                message: "at least one of adverse_outcome_path / disease_path is required"
                    .to_string(),
            }
            .into())
        }
    };

    let key_event_path = dicts.key_event_path.as_deref().ok_or_else(|| {
        ConfigError::ValidationFailed {
            field: "dictionaries.key_event_path".to_string(),
            message: "key-event reference file is required".to_string(),
        }
    })?;
    let key_events = load_key_event_data(key_event_path, dicts.relationship_path.as_deref())?;

    info!(
        dictionary_entries = dictionary.len(),
        key_events = key_events.len(),
        "dictionaries loaded"
    );

    Ok(CorpusScanner::new(dictionary, key_events).with_parallelism(config.scan.parallelism))
}

/// Run one full pass over the stored corpus: parallel scan, batch
/// persistence, suroccurrence correction, WAL checkpoint.
pub fn run_mining_pass(
    scanner: &CorpusScanner,
    db: &DatabaseManager,
    token: &CancellationToken,
) -> Result<PipelineResult<PipelineSummary>, PipelineError> {
    let report = scanner.scan(db, token)?;
    let persisted = persist_outcomes(db, &report.outcomes)?;
    let correction = apply_suroccurrence_correction(db)?;
    db.checkpoint()?;

    let mut result = PipelineResult::new(PipelineSummary {
        records_scanned: report.records_scanned,
        records_matched: report.records_matched,
        disease_matches_inserted: persisted.disease_matches_inserted,
        key_event_matches_inserted: persisted.key_event_matches_inserted,
        diseases_adjusted: correction.diseases_adjusted,
        key_events_adjusted: correction.key_events_adjusted,
        duration_ms: report.duration.as_millis() as u64,
    });
    for error in report.errors {
        result.add_error(error);
    }
    Ok(result)
}
