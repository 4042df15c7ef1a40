pub mod choices;
pub mod choropleth;
pub mod config;
pub mod filter;
pub mod reload;
pub mod summary;
pub mod trips;
pub mod zones;

use std::sync::Arc;
use actix_web::web;
use data_loader::{DatasetCache, LoadedData};
use crate::ServerError;

pub use choices::choices as choices_api;
pub use choropleth::choropleth as choropleth_api;
pub use config::config as config_api;
pub use reload::reload as reload_api;
pub use summary::summary as summary_api;
pub use trips::trips as trips_api;
pub use zones::zones as zones_api;

/// Current data snapshot. Only the first request after startup or a failed reload actually loads
/// files, which happens on the blocking pool.
async fn snapshot(cache: &web::Data<DatasetCache>) -> Result<Arc<LoadedData>, ServerError> {
    let cache = cache.clone().into_inner();
    Ok(web::block(move || cache.get()).await??)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::config::{DataFiles, ZoneCrs};
    use data_loader::DataLoadError;
    use std::path::PathBuf;

    #[actix_web::test]
    async fn test_snapshot_reports_load_failures() {
        let cache = web::Data::new(DatasetCache::new(DataFiles {
            purpose: PathBuf::from("does/not/exist/purpose.csv"),
            demographics: PathBuf::from("does/not/exist/demographics.csv"),
            attributes: PathBuf::from("does/not/exist/attributes.csv"),
            zones: PathBuf::from("does/not/exist/zones.geojson"),
            missing_value: "N/A".to_string(),
            zone_crs: ZoneCrs::Wgs84,
        }));

        let result = snapshot(&cache).await;

        assert!(matches!(result, Err(ServerError::DataLoad(DataLoadError::MissingFile(_)))));
        assert!(!cache.is_loaded());
    }
}
