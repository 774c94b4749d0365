//! Global daymark configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{DaymarkError, DaymarkResult};
use crate::store::FileStore;

/// Global configuration at ~/.config/daymark/config.toml
///
/// Everything is optional; an absent file means defaults everywhere.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalConfig {
    /// Override for the store file location.
    pub data_file: Option<PathBuf>,

    /// Override for the holidays-by-year endpoint base URL.
    pub holiday_endpoint: Option<String>,
}

impl GlobalConfig {
    pub fn config_path() -> DaymarkResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaymarkError::Storage("Could not determine config directory".into()))?
            .join("daymark");

        Ok(config_dir.join("config.toml"))
    }

    /// The store file this configuration points at.
    pub fn data_file_path(&self) -> DaymarkResult<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => FileStore::default_path(),
        }
    }
}
