//! Integration tests for the storage crate: record change detection,
//! idempotent persistence, suroccurrence correction, reporting views,
//! and scan history.

use aopminer_core::types::{AbstractRecord, AodMatch, KeMatch, KeOrigin, RecordOutcome};
use aopminer_storage::queries::{matches, records, scan_history, terms, views};
use aopminer_storage::queries::records::RecordChange;
use aopminer_storage::{apply_suroccurrence_correction, persist_outcomes, DatabaseManager};
use tempfile::TempDir;

fn record(id: &str, text: &str) -> AbstractRecord {
    AbstractRecord {
        id: id.to_string(),
        abstract_text: Some(text.to_string()),
        target: None,
        effects: Vec::new(),
    }
}

fn aod(name: &str, last_index: usize, abstract_len: usize) -> AodMatch {
    AodMatch {
        name: name.to_string(),
        last_index,
        abstract_len,
    }
}

fn ke(event_id: &str, name: &str, score: f64) -> KeMatch {
    KeMatch {
        event_id: event_id.to_string(),
        name: name.to_string(),
        origin: KeOrigin::KeyEvent,
        score,
    }
}

#[test]
fn test_open_file_database_and_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("miner.db");

    {
        let db = DatabaseManager::open(&path).unwrap();
        db.with_writer(|conn| records::upsert_record(conn, &record("r1", "text")).map(|_| ()))
            .unwrap();
        db.checkpoint().unwrap();
    }

    let db = DatabaseManager::open(&path).unwrap();
    let count = db.with_reader(records::count_records).unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_record_change_detection() {
    let db = DatabaseManager::open_in_memory().unwrap();

    let r = record("pmid:100", "liver fibrosis was observed");
    let change = db.with_writer(|conn| records::upsert_record(conn, &r)).unwrap();
    assert_eq!(change, RecordChange::Added);

    let change = db.with_writer(|conn| records::upsert_record(conn, &r)).unwrap();
    assert_eq!(change, RecordChange::Unchanged);

    let r2 = record("pmid:100", "revised abstract text");
    let change = db.with_writer(|conn| records::upsert_record(conn, &r2)).unwrap();
    assert_eq!(change, RecordChange::Updated);

    let stored = db
        .with_reader(|conn| records::get_record(conn, "pmid:100"))
        .unwrap();
    assert_eq!(stored.abstract_text.as_deref(), Some("revised abstract text"));
}

#[test]
fn test_get_record_missing_is_not_found() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let err = db
        .with_reader(|conn| records::get_record(conn, "nope"))
        .unwrap_err();
    assert!(err.to_string().contains("nope"));
}

#[test]
fn test_record_effects_round_trip() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let r = AbstractRecord {
        id: "chem:1".to_string(),
        abstract_text: None,
        target: Some("liver".to_string()),
        effects: vec!["necrosis".to_string(), "steatosis".to_string()],
    };
    db.with_writer(|conn| records::upsert_record(conn, &r).map(|_| ()))
        .unwrap();
    let stored = db
        .with_reader(|conn| records::get_record(conn, "chem:1"))
        .unwrap();
    assert_eq!(stored.effects, vec!["necrosis", "steatosis"]);
}

#[test]
fn test_persist_is_idempotent() {
    let db = DatabaseManager::open_in_memory().unwrap();
    db.with_writer(|conn| records::upsert_record(conn, &record("r1", "t")).map(|_| ()))
        .unwrap();

    let mut outcome = RecordOutcome::new("r1");
    outcome.aod_matches.push(aod("liver fibrosis", 10, 40));
    outcome.ke_matches.push(ke("55", "oxidative stress", 1.0));
    let outcomes = vec![outcome];

    let report = persist_outcomes(&db, &outcomes).unwrap();
    assert_eq!(report.disease_matches_inserted, 1);
    assert_eq!(report.key_event_matches_inserted, 1);
    assert_eq!(report.duplicates_skipped, 0);

    // Second persist of the same batch writes nothing new.
    let report = persist_outcomes(&db, &outcomes).unwrap();
    assert_eq!(report.disease_matches_inserted, 0);
    assert_eq!(report.key_event_matches_inserted, 0);
    assert_eq!(report.duplicates_skipped, 2);

    let diseases = db.with_reader(terms::all_diseases).unwrap();
    assert_eq!(diseases.len(), 1);
    assert_eq!(diseases[0].occurrence, 1);

    let key_events = db.with_reader(terms::all_key_events).unwrap();
    assert_eq!(key_events.len(), 1);
    assert_eq!(key_events[0].occurrence, 1);
    assert_eq!(key_events[0].origin, "key_event");
}

#[test]
fn test_duplicate_matches_within_one_batch_skipped() {
    let db = DatabaseManager::open_in_memory().unwrap();
    db.with_writer(|conn| records::upsert_record(conn, &record("r1", "t")).map(|_| ()))
        .unwrap();

    let mut outcome = RecordOutcome::new("r1");
    outcome.aod_matches.push(aod("cholestasis", 5, 20));
    outcome.aod_matches.push(aod("cholestasis", 15, 20));
    let report = persist_outcomes(&db, &[outcome]).unwrap();

    assert_eq!(report.disease_matches_inserted, 1);
    assert_eq!(report.duplicates_skipped, 1);

    let diseases = db.with_reader(terms::all_diseases).unwrap();
    assert_eq!(diseases[0].occurrence, 1);
}

#[test]
fn test_suroccurrence_correction_zeroes_head_counter() {
    let db = DatabaseManager::open_in_memory().unwrap();

    // Five records, all matching both the head term and the phrase.
    let mut outcomes = Vec::new();
    for i in 0..5 {
        let id = format!("r{i}");
        db.with_writer(|conn| records::upsert_record(conn, &record(&id, "t")).map(|_| ()))
            .unwrap();
        let mut outcome = RecordOutcome::new(id);
        outcome.aod_matches.push(aod("fibrosis", 0, 0));
        outcome.aod_matches.push(aod("liver fibrosis", 0, 0));
        outcomes.push(outcome);
    }
    persist_outcomes(&db, &outcomes).unwrap();

    let report = apply_suroccurrence_correction(&db).unwrap();
    assert_eq!(report.diseases_adjusted, 1);

    let diseases = db.with_reader(terms::all_diseases).unwrap();
    let by_name: Vec<(&str, i64)> = diseases
        .iter()
        .map(|d| (d.name.as_str(), d.occurrence))
        .collect();
    assert!(by_name.contains(&("fibrosis", 0)));
    assert!(by_name.contains(&("liver fibrosis", 5)));

    // The zeroed head drops out of the reports but keeps its rows.
    let listed = db.with_reader(views::diseases_by_occurrence).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "liver fibrosis");
    let match_count = db.with_reader(matches::count_disease_matches).unwrap();
    assert_eq!(match_count, 10);
}

#[test]
fn test_correction_applies_to_key_events_too() {
    let db = DatabaseManager::open_in_memory().unwrap();
    db.with_writer(|conn| records::upsert_record(conn, &record("r1", "t")).map(|_| ()))
        .unwrap();

    let mut outcome = RecordOutcome::new("r1");
    outcome.ke_matches.push(ke("1", "apoptosis", 1.0));
    outcome.ke_matches.push(ke("2", "hepatocyte apoptosis", 0.5));
    persist_outcomes(&db, &[outcome]).unwrap();

    let report = apply_suroccurrence_correction(&db).unwrap();
    assert_eq!(report.key_events_adjusted, 1);

    let listed = db.with_reader(views::key_events_by_occurrence).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "hepatocyte apoptosis");
}

#[test]
fn test_views_ordering() {
    let db = DatabaseManager::open_in_memory().unwrap();
    for (i, name) in ["zymosis", "anemia", "malaria"].iter().enumerate() {
        for r in 0..=i {
            let id = format!("{name}-{r}");
            db.with_writer(|conn| records::upsert_record(conn, &record(&id, "t")).map(|_| ()))
                .unwrap();
            let mut outcome = RecordOutcome::new(id);
            outcome.aod_matches.push(aod(name, 0, 0));
            persist_outcomes(&db, &[outcome]).unwrap();
        }
    }

    let alpha = db.with_reader(views::diseases_alphabetical).unwrap();
    let names: Vec<&str> = alpha.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["anemia", "malaria", "zymosis"]);

    let by_occ = db.with_reader(views::diseases_by_occurrence).unwrap();
    let counts: Vec<i64> = by_occ.iter().map(|d| d.occurrence).collect();
    assert_eq!(counts, vec![3, 2, 1]);
}

#[test]
fn test_matches_for_record_spans_both_tables() {
    let db = DatabaseManager::open_in_memory().unwrap();
    db.with_writer(|conn| records::upsert_record(conn, &record("r1", "t")).map(|_| ()))
        .unwrap();

    let mut outcome = RecordOutcome::new("r1");
    outcome.aod_matches.push(aod("steatosis", 8, 32));
    outcome.ke_matches.push(ke("7", "lipid accumulation", -0.5));
    persist_outcomes(&db, &[outcome]).unwrap();

    let rows = db
        .with_reader(|conn| views::matches_for_record(conn, "r1"))
        .unwrap();
    assert_eq!(rows.len(), 2);

    let disease_rows = db
        .with_reader(|conn| views::matches_for_disease(conn, "steatosis"))
        .unwrap();
    assert_eq!(disease_rows.len(), 1);
    assert!((disease_rows[0].value - 0.25).abs() < 1e-9);

    let ke_rows = db
        .with_reader(|conn| views::matches_for_key_event(conn, "7"))
        .unwrap();
    assert_eq!(ke_rows.len(), 1);
    assert!((ke_rows[0].value + 0.5).abs() < 1e-9);
}

#[test]
fn test_scan_history_lifecycle() {
    let db = DatabaseManager::open_in_memory().unwrap();

    let scan_id = db.with_writer(scan_history::insert_scan_start).unwrap();
    db.with_writer(|conn| scan_history::update_scan_complete(conn, scan_id, 100, 40, 60, 0, 1234))
        .unwrap();

    let failed_id = db.with_writer(scan_history::insert_scan_start).unwrap();
    db.with_writer(|conn| scan_history::update_scan_failed(conn, failed_id, "cancelled"))
        .unwrap();

    let scans = db
        .with_reader(|conn| scan_history::query_recent(conn, 10))
        .unwrap();
    assert_eq!(scans.len(), 2);
    assert_eq!(db.with_reader(scan_history::count).unwrap(), 2);

    let completed = scans.iter().find(|s| s.id == scan_id).unwrap();
    assert_eq!(completed.status, "completed");
    assert_eq!(completed.total_records, Some(100));
    assert_eq!(completed.matched_records, Some(40));
    assert_eq!(completed.duration_ms, Some(1234));

    let failed = scans.iter().find(|s| s.id == failed_id).unwrap();
    assert_eq!(failed.status, "failed");
    assert_eq!(failed.error.as_deref(), Some("cancelled"));
}

#[test]
fn test_read_pool_sees_writer_data_in_memory() {
    let db = DatabaseManager::open_in_memory().unwrap();
    db.with_writer(|conn| records::upsert_record(conn, &record("r1", "t")).map(|_| ()))
        .unwrap();
    let ids = db.with_reader(records::record_ids).unwrap();
    assert_eq!(ids, vec!["r1".to_string()]);
}
