//! V001: Initial schema.
//! abstract_records, diseases, key_events, disease_matches,
//! key_event_matches, scan_history.

pub const MIGRATION_SQL: &str = r#"
-- Abstract records: the corpus, ingested by the parsing collaborators.
-- Workers re-read these rows during the parallel scan phase.
CREATE TABLE IF NOT EXISTS abstract_records (
    id TEXT PRIMARY KEY,
    abstract TEXT,
    target TEXT,
    effects TEXT NOT NULL DEFAULT '[]',
    content_hash INTEGER NOT NULL,
    ingested_at INTEGER NOT NULL
) STRICT;

-- Diseases / adverse outcomes with corrected occurrence counters.
-- Occurrence may go to zero or below after suroccurrence correction;
-- the reporting views filter to occurrence > 0.
CREATE TABLE IF NOT EXISTS diseases (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    occurrence INTEGER NOT NULL DEFAULT 0
) STRICT;

-- Key events, identified by their reference-file id.
CREATE TABLE IF NOT EXISTS key_events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    origin TEXT NOT NULL DEFAULT 'key_event',
    occurrence INTEGER NOT NULL DEFAULT 0
) STRICT;

-- Disease <-> record associations with position weight.
-- At most one row per (disease, record) pair.
CREATE TABLE IF NOT EXISTS disease_matches (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    disease_id INTEGER NOT NULL REFERENCES diseases(id),
    record_id TEXT NOT NULL REFERENCES abstract_records(id),
    last_index INTEGER NOT NULL DEFAULT 0,
    weight REAL NOT NULL DEFAULT 0.0,
    UNIQUE(disease_id, record_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_disease_matches_record
    ON disease_matches(record_id);

-- Key-event <-> record associations with plausibility score.
-- At most one row per (key event, record) pair.
CREATE TABLE IF NOT EXISTS key_event_matches (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    key_event_id INTEGER NOT NULL REFERENCES key_events(id),
    record_id TEXT NOT NULL REFERENCES abstract_records(id),
    score REAL NOT NULL DEFAULT 0.0,
    UNIQUE(key_event_id, record_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_key_event_matches_record
    ON key_event_matches(record_id);

-- Scan history: append-only log of corpus scans.
CREATE TABLE IF NOT EXISTS scan_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at INTEGER NOT NULL,
    completed_at INTEGER,
    total_records INTEGER,
    matched_records INTEGER,
    unmatched_records INTEGER,
    failed_records INTEGER,
    duration_ms INTEGER,
    status TEXT NOT NULL DEFAULT 'running',
    error TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS idx_scan_history_time
    ON scan_history(started_at DESC);
"#;
