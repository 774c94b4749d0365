//! Configuration loading and context assembly.

use anyhow::Result;
use config::{Config, File};
use daymark_core::{Daymark, FileStore, GlobalConfig, HolidayCache};

pub fn load_config() -> Result<GlobalConfig> {
    let config_path = GlobalConfig::config_path()?;

    let config: GlobalConfig = Config::builder()
        .add_source(File::from(config_path).required(false))
        .build()?
        .try_deserialize()?;

    Ok(config)
}

/// Build the one `Daymark` context the whole invocation works with.
pub fn open(config: &GlobalConfig) -> Result<Daymark> {
    let store_path = config.data_file_path()?;
    log::debug!("using store file at {}", store_path.display());
    let store = FileStore::new(store_path);

    let holidays = match &config.holiday_endpoint {
        Some(endpoint) => HolidayCache::with_base_url(endpoint.clone()),
        None => HolidayCache::new(),
    };

    Ok(Daymark::open_with(Box::new(store), holidays))
}
