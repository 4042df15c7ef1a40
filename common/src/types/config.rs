use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1")]
    Version1 {
        data: DataFiles,
        #[serde(default)]
        server: ServerConfig,
    }
}

impl Config {
    pub fn data_files(&self) -> &DataFiles {
        match self {
            Config::Version1 { data, .. } => data,
        }
    }

    pub fn server(&self) -> &ServerConfig {
        match self {
            Config::Version1 { server, .. } => server,
        }
    }
}

/// Input files. Durations and lengths are both taken from the attributes file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DataFiles {
    pub purpose: PathBuf,
    pub demographics: PathBuf,
    pub attributes: PathBuf,
    pub zones: PathBuf,
    /// Token that marks a missing value in the CSV files
    #[serde(default = "default_missing_value")]
    pub missing_value: String,
    #[serde(default)]
    pub zone_crs: ZoneCrs,
}

fn default_missing_value() -> String {
    "N/A".to_string()
}

/// Coordinate reference system of the zone file
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneCrs {
    #[default]
    #[serde(rename = "EPSG:4326")]
    Wgs84,
    #[serde(rename = "EPSG:3857")]
    WebMercator,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    /// Origins allowed to call the API from a browser, e.g. a dashboard dev server
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: default_address(), allowed_origins: vec![] }
    }
}

fn default_address() -> String {
    "127.0.0.1:3001".to_string()
}
