//! Filtering and aggregation of trip tables. All operations are pure functions of a table and a
//! [`FilterSpec`](common::types::filter::FilterSpec); nothing is cached between calls.

pub mod category;
mod error;
pub mod selection;
pub mod zone_totals;

pub use category::{aggregate_by_category, CategoryAggregation, CategoryCount};
pub use error::AggregationError;
pub use zone_totals::{aggregate_by_zone, ZoneTotal, ZoneTotals};

/// Trip counts are real valued until they are displayed. They are truncated, not rounded, and
/// never negative.
pub(crate) fn truncate_trips(trips: f64) -> u64 {
    // `as` saturates: negative values and NaN end up as 0
    trips.trunc() as u64
}
