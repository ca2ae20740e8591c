//! Configuration system for aopminer.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod dictionaries_config;
pub mod miner_config;
pub mod scan_config;
pub mod storage_config;

pub use dictionaries_config::DictionariesConfig;
pub use miner_config::{MinerConfig, MinerOverrides};
pub use scan_config::ScanConfig;
pub use storage_config::StorageConfig;
