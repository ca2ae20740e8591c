//! Top-level aopminer configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use tracing::debug;

use super::{DictionariesConfig, ScanConfig, StorageConfig};
use crate::errors::ConfigError;

/// Maximum read-pool size accepted by `validate`.
const MAX_READ_POOL_SIZE: usize = 8;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`AOPMINER_*`)
/// 3. Project config (`aopminer.toml` in project root)
/// 4. User config (`~/.aopminer/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MinerConfig {
    pub dictionaries: DictionariesConfig,
    pub scan: ScanConfig,
    pub storage: StorageConfig,
}

/// Override arguments that can be applied on top of any loaded config.
#[derive(Debug, Clone, Default)]
pub struct MinerOverrides {
    pub parallelism: Option<usize>,
    pub database_path: Option<String>,
    pub read_pool_size: Option<usize>,
}

impl MinerConfig {
    /// Load configuration with layered resolution.
    pub fn load(
        root: &Path,
        overrides: Option<&MinerOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(_) => {
                        // Non-parse errors from user config are warnings, not fatal.
                        // Continue with defaults.
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("aopminer.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): explicit overrides
        if let Some(ov) = overrides {
            Self::apply_overrides(&mut config, ov);
        }

        Self::validate(&config)?;

        debug!(
            parallelism = ?config.scan.parallelism,
            database_path = ?config.storage.database_path,
            "configuration resolved"
        );

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &MinerConfig) -> Result<(), ConfigError> {
        if let Some(size) = config.storage.read_pool_size {
            if size == 0 || size > MAX_READ_POOL_SIZE {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.read_pool_size".to_string(),
                    message: format!("must be between 1 and {MAX_READ_POOL_SIZE}"),
                });
            }
        }
        if let Some(ref path) = config.storage.database_path {
            if path.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.database_path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.aopminer/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        home_dir().map(|h| h.join(".aopminer").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut MinerConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| {
            ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
        })?;

        let file_config: MinerConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut MinerConfig, other: &MinerConfig) {
        // Dictionaries
        if other.dictionaries.adverse_outcome_path.is_some() {
            base.dictionaries.adverse_outcome_path =
                other.dictionaries.adverse_outcome_path.clone();
        }
        if other.dictionaries.disease_path.is_some() {
            base.dictionaries.disease_path = other.dictionaries.disease_path.clone();
        }
        if other.dictionaries.key_event_path.is_some() {
            base.dictionaries.key_event_path = other.dictionaries.key_event_path.clone();
        }
        if other.dictionaries.relationship_path.is_some() {
            base.dictionaries.relationship_path =
                other.dictionaries.relationship_path.clone();
        }

        // Scan
        if other.scan.parallelism.is_some() {
            base.scan.parallelism = other.scan.parallelism;
        }

        // Storage
        if other.storage.database_path.is_some() {
            base.storage.database_path = other.storage.database_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `AOPMINER_SCAN_PARALLELISM`, `AOPMINER_STORAGE_DATABASE_PATH`, etc.
    fn apply_env_overrides(config: &mut MinerConfig) {
        if let Ok(val) = std::env::var("AOPMINER_SCAN_PARALLELISM") {
            if let Ok(v) = val.parse::<usize>() {
                config.scan.parallelism = Some(v);
            }
        }
        if let Ok(val) = std::env::var("AOPMINER_STORAGE_DATABASE_PATH") {
            config.storage.database_path = Some(val);
        }
        if let Ok(val) = std::env::var("AOPMINER_STORAGE_READ_POOL_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.storage.read_pool_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("AOPMINER_DICT_ADVERSE_OUTCOME_PATH") {
            config.dictionaries.adverse_outcome_path = Some(val.into());
        }
        if let Ok(val) = std::env::var("AOPMINER_DICT_DISEASE_PATH") {
            config.dictionaries.disease_path = Some(val.into());
        }
        if let Ok(val) = std::env::var("AOPMINER_DICT_KEY_EVENT_PATH") {
            config.dictionaries.key_event_path = Some(val.into());
        }
        if let Ok(val) = std::env::var("AOPMINER_DICT_RELATIONSHIP_PATH") {
            config.dictionaries.relationship_path = Some(val.into());
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut MinerConfig, ov: &MinerOverrides) {
        if let Some(v) = ov.parallelism {
            config.scan.parallelism = Some(v);
        }
        if let Some(ref v) = ov.database_path {
            config.storage.database_path = Some(v.clone());
        }
        if let Some(v) = ov.read_pool_size {
            config.storage.read_pool_size = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
