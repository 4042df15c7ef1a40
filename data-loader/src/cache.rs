use crate::trip_tables::{load_trip_table, read_wide_table, required_columns, reshape};
use crate::zones::load_zones;
use crate::DataLoadError;
use common::types::config::DataFiles;
use common::types::schema::{DurationBin, IncomeBin, LengthBin, TripPurpose};
use common::types::trip_table::TripTable;
use common::types::zone::ZoneSet;
use common::types::ZoneId;
use itertools::Itertools;
use log::{debug, info};
use polars::error::PolarsResult;
use std::sync::{Arc, PoisonError, RwLock};

/// Everything the aggregations work on. Snapshots are immutable and shared between queries.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub purpose: TripTable<TripPurpose>,
    pub income: TripTable<IncomeBin>,
    pub duration: TripTable<DurationBin>,
    pub length: TripTable<LengthBin>,
    pub zones: ZoneSet,
}

impl LoadedData {
    pub fn load(files: &DataFiles) -> Result<Self, DataLoadError> {
        let missing_value = files.missing_value.as_str();

        let purpose = load_trip_table::<TripPurpose>(&files.purpose, missing_value)?;
        let income = load_trip_table::<IncomeBin>(&files.demographics, missing_value)?;

        // Durations and lengths come out of the same file, so only read it once
        let attribute_columns = required_columns::<DurationBin>().into_iter()
            .chain(required_columns::<LengthBin>())
            .unique()
            .collect_vec();
        let attributes = read_wide_table(&files.attributes, missing_value, &attribute_columns)?;
        let duration = reshape::<DurationBin>(attributes.clone(), &files.attributes)?;
        let length = reshape::<LengthBin>(attributes, &files.attributes)?;
        debug!(target: "loader", "Loaded duration and length tables from {:?}", files.attributes);

        let zones = load_zones(&files.zones, files.zone_crs)?;

        Ok(Self { purpose, income, duration, length, zones })
    }

    /// Zone id extent of the O-D rows, taken from the purpose table
    pub fn zone_extent(&self) -> PolarsResult<Option<(ZoneId, ZoneId)>> {
        self.purpose.zone_extent()
    }
}

/// Loads the configured files on first use and hands out shared snapshots until invalidated.
pub struct DatasetCache {
    files: DataFiles,
    snapshot: RwLock<Option<Arc<LoadedData>>>,
}

impl DatasetCache {
    pub fn new(files: DataFiles) -> Self {
        Self {
            files,
            snapshot: RwLock::new(None),
        }
    }

    pub fn files(&self) -> &DataFiles {
        &self.files
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Returns the current snapshot, loading it first if necessary. A failed load leaves the cache
    /// empty, so the next call tries again.
    pub fn get(&self) -> Result<Arc<LoadedData>, DataLoadError> {
        if let Some(snapshot) = self.snapshot.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let mut snapshot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller might have loaded the data while we were waiting for the lock
        if let Some(snapshot) = snapshot.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        info!(target: "loader", "Loading trip tables and zones");
        let data = Arc::new(LoadedData::load(&self.files)?);
        *snapshot = Some(Arc::clone(&data));

        Ok(data)
    }

    /// Drops the current snapshot. Queries still holding it keep working on the old data.
    pub fn invalidate(&self) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = None;
        debug!(target: "loader", "Dataset cache invalidated");
    }

    pub fn reload(&self) -> Result<Arc<LoadedData>, DataLoadError> {
        self.invalidate();
        self.get()
    }
}
