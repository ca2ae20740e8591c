//! # aopminer-storage
//!
//! SQLite persistence for the aopminer engine: connection management
//! (serialized writer + read pool), versioned migrations, queries for
//! records/terms/matches/views, batch persistence of scan outcomes, and
//! the suroccurrence correction pass.

pub mod connection;
pub mod correction;
pub mod migrations;
pub mod persist;
pub mod queries;

pub use connection::DatabaseManager;
pub use correction::{apply_suroccurrence_correction, CorrectionReport};
pub use persist::{persist_outcomes, PersistReport};
