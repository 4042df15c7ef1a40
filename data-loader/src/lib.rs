pub mod cache;
pub mod consistency;
mod error;
pub mod trip_tables;
pub mod zones;

pub use cache::{DatasetCache, LoadedData};
pub use error::DataLoadError;
