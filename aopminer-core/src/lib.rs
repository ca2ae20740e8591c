//! # aopminer-core
//!
//! Shared foundation for the aopminer text-mining engine.
//! Provides abstract-record and match-result types, the error taxonomy,
//! layered configuration, and the trait seams (stemmer, cancellation)
//! used by the analysis and storage crates.

pub mod config;
pub mod errors;
pub mod logging;
pub mod traits;
pub mod types;
