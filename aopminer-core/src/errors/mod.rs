//! Error handling for aopminer.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod dictionary_error;
pub mod pipeline_error;
pub mod scan_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use dictionary_error::DictionaryError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use scan_error::ScanError;
pub use storage_error::StorageError;
