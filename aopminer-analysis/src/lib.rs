//! # aopminer-analysis
//!
//! The text-mining engine: abstract normalization, AOD/KE dictionary
//! construction, the substring and plausibility matchers, and the
//! parallel corpus scanner that ties them together.

pub mod dictionary;
pub mod matchers;
pub mod normalize;
pub mod pipeline;
pub mod scanner;

pub use dictionary::aod::{AodIndex, AodSource};
pub use dictionary::key_events::KeEntry;
pub use normalize::Normalizer;
pub use pipeline::{run_mining_pass, scanner_from_config, PipelineSummary};
pub use scanner::report::ScanReport;
pub use scanner::CorpusScanner;
