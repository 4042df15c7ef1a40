use common::types::config::Config;
use log::info;
use std::fmt;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use crate::bootstrap_config::BootstrapConfig;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    IO(PathBuf, #[source] std::io::Error),
    Parse(PathBuf, #[source] serde_yml::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IO(path, err) => write!(f, "Could not open config file {path:?}: {err}"),
            ConfigError::Parse(path, err) => write!(f, "Could not read config file {path:?}: {err}"),
        }
    }
}

pub(super) fn load_config(bootstrap_config: &BootstrapConfig) -> Result<Config, ConfigError> {
    let path: &Path = Path::new(&bootstrap_config.config_file);

    // Internally tagged enums only deserialize from a complete document
    let contents = fs::read_to_string(path)
        .map_err(|err| ConfigError::IO(path.to_path_buf(), err))?;
    let config: Config = serde_yml::from_str(&contents)
        .map_err(|err| ConfigError::Parse(path.to_path_buf(), err))?;

    info!(target: "main", "Config read successfully from {path:?}");

    Ok(config)
}
