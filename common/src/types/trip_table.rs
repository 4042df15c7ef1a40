use crate::types::schema::{Category, DAY_PART, DAY_TYPE, DESTINATION_ZONE_ID, ORIGIN_ZONE_ID, TRIPS};
use crate::types::ZoneId;
use polars::error::PolarsResult;
use polars::frame::DataFrame;
use polars::prelude::{ChunkAgg, IntoLazy, LazyFrame};
use std::marker::PhantomData;

/// Where a trip table came from, kept to compare tables that were derived from the same O-D rows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Provenance {
    /// Number of rows of the wide source table
    pub source_rows: usize,
    /// Sum of the trip count index over all source rows
    pub index_total: f64,
}

/// Long-format trip table for one breakdown dimension.
///
/// Columns: `Origin Zone ID` (u32), `Destination Zone ID` (u32), `Day Type` (str),
/// `Day Part` (str), `C::DIMENSION` (str, raw column name of the category) and `Trips` (f64).
/// Tables are read-only once built.
#[derive(Debug, Clone)]
pub struct TripTable<C: Category> {
    frame: DataFrame,
    provenance: Provenance,
    _category: PhantomData<C>,
}

impl<C: Category> TripTable<C> {
    /// Wraps an already reshaped frame. Fails if one of the long-format columns is missing.
    pub fn new(frame: DataFrame, provenance: Provenance) -> PolarsResult<Self> {
        for name in [ORIGIN_ZONE_ID, DESTINATION_ZONE_ID, DAY_TYPE, DAY_PART, C::DIMENSION, TRIPS] {
            frame.column(name)?;
        }

        Ok(Self {
            frame,
            provenance,
            _category: PhantomData,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone().lazy()
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Number of long-format rows
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn total_trips(&self) -> PolarsResult<f64> {
        let trips = self.frame.column(TRIPS)?.as_materialized_series().f64()?;
        Ok(trips.sum().unwrap_or(0.0))
    }

    /// Smallest and largest zone id over both origins and destinations
    pub fn zone_extent(&self) -> PolarsResult<Option<(ZoneId, ZoneId)>> {
        let origins = self.frame.column(ORIGIN_ZONE_ID)?.as_materialized_series().u32()?;
        let destinations = self.frame.column(DESTINATION_ZONE_ID)?.as_materialized_series().u32()?;

        let lo = origins.min().into_iter().chain(destinations.min()).min();
        let hi = origins.max().into_iter().chain(destinations.max()).max();

        Ok(lo.zip(hi).map(|(lo, hi)| (ZoneId(lo), ZoneId(hi))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::schema::TripPurpose;
    use polars::df;

    fn table() -> TripTable<TripPurpose> {
        let frame = df![
            ORIGIN_ZONE_ID => [5u32, 7, 2],
            DESTINATION_ZONE_ID => [10u32, 1, 9],
            DAY_TYPE => ["0: Average Day (M-Su)"; 3],
            DAY_PART => ["0: All Day (12am-12am)"; 3],
            "Purpose" => ["Purpose HBW (percent)", "Purpose HBO (percent)", "Purpose NHB (percent)"],
            TRIPS => [40.0, 60.5, 0.25],
        ].unwrap();

        TripTable::new(frame, Provenance::default()).unwrap()
    }

    #[test]
    fn test_zone_extent_spans_origins_and_destinations() {
        assert_eq!(table().zone_extent().unwrap(), Some((ZoneId(1), ZoneId(10))));
    }

    #[test]
    fn test_total_trips() {
        assert_eq!(table().total_trips().unwrap(), 100.75);
        assert_eq!(table().len(), 3);
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let frame = df![
            ORIGIN_ZONE_ID => [5u32],
            DESTINATION_ZONE_ID => [10u32],
            DAY_TYPE => ["0: Average Day (M-Su)"],
            DAY_PART => ["0: All Day (12am-12am)"],
            TRIPS => [1.0],
        ].unwrap();

        assert!(TripTable::<TripPurpose>::new(frame, Provenance::default()).is_err());
    }
}
