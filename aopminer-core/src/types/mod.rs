//! Core data types: abstract records, match results, collection aliases.

pub mod collections;
pub mod matches;
pub mod record;

pub use matches::{AodMatch, KeMatch, KeOrigin, RecordOutcome};
pub use record::{AbstractRecord, DrivingField};
