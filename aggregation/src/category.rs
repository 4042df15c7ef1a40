use crate::selection::select_rows;
use crate::{truncate_trips, AggregationError};
use common::types::filter::FilterSpec;
use common::types::schema::{Category, TRIPS};
use common::types::trip_table::TripTable;
use hashbrown::HashMap;
use itertools::Itertools;
use log::trace;
use polars::df;
use polars::error::PolarsResult;
use polars::frame::DataFrame;
use polars::prelude::col;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount<C: Category> {
    pub category: C,
    pub trips: u64,
}

impl<C: Category> CategoryCount<C> {
    /// Display label, i.e. the source column without its unit annotation
    pub fn label(&self) -> &'static str {
        self.category.label()
    }
}

impl<C: Category> Serialize for CategoryCount<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CategoryCount", 3)?;
        state.serialize_field("category", self.category.short_name())?;
        state.serialize_field("label", self.label())?;
        state.serialize_field("trips", &self.trips)?;
        state.end()
    }
}

/// Trips per category, one entry for every category of the dimension in enumeration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound = "")]
pub struct CategoryAggregation<C: Category> {
    dimension: &'static str,
    rows: Vec<CategoryCount<C>>,
}

impl<C: Category> CategoryAggregation<C> {
    pub fn rows(&self) -> &[CategoryCount<C>] {
        &self.rows
    }

    pub fn get(&self, category: C) -> u64 {
        self.rows.iter()
            .find(|row| row.category == category)
            .map_or(0, |row| row.trips)
    }

    pub fn total(&self) -> u64 {
        self.rows.iter().map(|row| row.trips).sum()
    }

    /// Two column table (`C::DIMENSION` label, `Trips`) as handed to a plotting layer
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        df![
            C::DIMENSION => self.rows.iter().map(|row| row.label()).collect_vec(),
            TRIPS => self.rows.iter().map(|row| row.trips).collect_vec(),
        ]
    }
}

/// Sums the trips of all rows selected by `filter` per category.
///
/// Categories without any selected row are reported with 0 trips, so the result always has
/// `C::ALL.len()` entries. Sums are truncated to integers after summing.
pub fn aggregate_by_category<C: Category>(
    table: &TripTable<C>,
    filter: &FilterSpec,
) -> Result<CategoryAggregation<C>, AggregationError> {
    let grouped = select_rows(table, filter)
        .group_by([col(C::DIMENSION)])
        .agg([col(TRIPS).sum()])
        .collect()?;

    let categories = grouped.column(C::DIMENSION)?.as_materialized_series().str()?;
    let trips = grouped.column(TRIPS)?.as_materialized_series().f64()?;

    let sums: HashMap<&str, f64> = categories.into_iter()
        .zip(trips)
        .filter_map(|(category, trips)| Some((category?, trips.unwrap_or(0.0))))
        .collect();

    trace!(target: "aggregation", "{} categories of dimension {} matched", sums.len(), C::DIMENSION);

    // Reindex against the full enumeration
    let rows = C::ALL.iter()
        .map(|&category| CategoryCount {
            category,
            trips: truncate_trips(sums.get(category.column()).copied().unwrap_or(0.0)),
        })
        .collect();

    Ok(CategoryAggregation {
        dimension: C::DIMENSION,
        rows,
    })
}
