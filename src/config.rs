mod telegraph;

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub use crate::config::telegraph::TelegraphConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Deserialize Error: {0}")]
    DeserializeError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegraph: TelegraphConfig,
}

impl Config {
    pub fn read_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let config: Config = serde_json::from_reader(file)?;
        Ok(config)
    }
}
