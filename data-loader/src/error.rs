use itertools::Itertools;
use polars::error::PolarsError;
use std::fmt::Display;
use std::path::PathBuf;
use std::{fmt, io};
use common::types::ZoneId;

/// Anything that keeps the input files from being turned into trip tables or zones. These are
/// fatal: no partially loaded data is ever handed out.
#[derive(thiserror::Error, Debug)]
pub enum DataLoadError {
    MissingFile(PathBuf),
    MissingColumns {
        path: PathBuf,
        columns: Vec<String>,
    },
    UnknownValue {
        path: PathBuf,
        column: &'static str,
        value: Option<String>,
    },
    MalformedGeometry {
        path: PathBuf,
        reason: String,
    },
    DuplicateZone {
        path: PathBuf,
        id: ZoneId,
    },
    Polars(#[from] PolarsError),
    GeoJson(#[from] geojson::Error),
    IO(#[from] io::Error),
}

impl Display for DataLoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataLoadError::MissingFile(path) => write!(f, "File {path:?} does not exist"),
            DataLoadError::MissingColumns { path, columns } => write!(
                f, "File {path:?} is missing the columns {}",
                columns.iter().map(|c| format!("'{c}'")).join(", ")
            ),
            DataLoadError::UnknownValue { path, column, value: Some(value) } => write!(
                f, "File {path:?} contains the unknown value '{value}' in column '{column}'"
            ),
            DataLoadError::UnknownValue { path, column, value: None } => write!(
                f, "File {path:?} contains an empty value in column '{column}'"
            ),
            DataLoadError::MalformedGeometry { path, reason } => write!(f, "Malformed zone file {path:?}: {reason}"),
            DataLoadError::DuplicateZone { path, id } => write!(f, "Zone {id} is defined more than once in {path:?}"),
            DataLoadError::Polars(err) => write!(f, "{err}"),
            DataLoadError::GeoJson(err) => write!(f, "{err}"),
            DataLoadError::IO(err) => write!(f, "{err}"),
        }
    }
}
