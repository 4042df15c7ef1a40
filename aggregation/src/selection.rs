use common::types::filter::{FilterSpec, ZoneRange};
use common::types::schema::{Category, DAY_PART, DAY_TYPE, DESTINATION_ZONE_ID, ORIGIN_ZONE_ID};
use common::types::trip_table::TripTable;
use polars::prelude::{col, lit, Expr, LazyFrame};

/// Row predicate of a filter: origin and destination in their (inclusive) ranges, matching day type
/// and one of the selected day parts.
pub fn selection(filter: &FilterSpec) -> Expr {
    let day_parts = filter.day_parts().iter()
        .map(|day_part| col(DAY_PART).eq(lit(day_part.code())))
        .reduce(|lhs, rhs| lhs.or(rhs))
        // Nothing selected matches nothing
        .unwrap_or(lit(false));

    in_range(ORIGIN_ZONE_ID, filter.origin())
        .and(in_range(DESTINATION_ZONE_ID, filter.destination()))
        .and(col(DAY_TYPE).eq(lit(filter.day_type().code())))
        .and(day_parts)
}

fn in_range(column: &str, range: ZoneRange) -> Expr {
    // An inverted range can't be satisfied by any value, no special casing needed
    col(column).gt_eq(lit(range.lo.0))
        .and(col(column).lt_eq(lit(range.hi.0)))
}

pub fn select_rows<C: Category>(table: &TripTable<C>, filter: &FilterSpec) -> LazyFrame {
    table.lazy().filter(selection(filter))
}
