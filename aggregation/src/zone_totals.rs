use crate::selection::select_rows;
use crate::{truncate_trips, AggregationError};
use common::types::filter::FilterSpec;
use common::types::schema::{Category, DESTINATION_ZONE_ID, ORIGIN_ZONE_ID, TRIPS};
use common::types::trip_table::TripTable;
use common::types::ZoneId;
use polars::prelude::{col, IntoLazy, LazyFrame};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneTotal {
    pub zone: ZoneId,
    pub trips: u64,
}

/// Trips per origin zone and per destination zone, both sorted by zone id.
///
/// Only zones that have at least one selected row show up here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZoneTotals {
    pub origins: Vec<ZoneTotal>,
    pub destinations: Vec<ZoneTotal>,
}

impl ZoneTotals {
    pub fn origin(&self, zone: ZoneId) -> Option<u64> {
        find(&self.origins, zone)
    }

    pub fn destination(&self, zone: ZoneId) -> Option<u64> {
        find(&self.destinations, zone)
    }

    pub fn origin_total(&self) -> u64 {
        self.origins.iter().map(|total| total.trips).sum()
    }

    pub fn destination_total(&self) -> u64 {
        self.destinations.iter().map(|total| total.trips).sum()
    }

    /// Largest origin total, used to scale the choropleth
    pub fn max_origin_trips(&self) -> Option<u64> {
        self.origins.iter().map(|total| total.trips).max()
    }
}

fn find(totals: &[ZoneTotal], zone: ZoneId) -> Option<u64> {
    totals.binary_search_by_key(&zone, |total| total.zone)
        .ok()
        .map(|idx| totals[idx].trips)
}

/// Sums the trips of all rows selected by `filter` per origin zone and per destination zone.
///
/// The category breakdown of the table doesn't matter as long as its categories partition the
/// trips of every O-D row; the purpose table is the one used for this.
pub fn aggregate_by_zone<C: Category>(
    table: &TripTable<C>,
    filter: &FilterSpec,
) -> Result<ZoneTotals, AggregationError> {
    let selected = select_rows(table, filter)
        .select([col(ORIGIN_ZONE_ID), col(DESTINATION_ZONE_ID), col(TRIPS)])
        .collect()?
        .lazy();

    Ok(ZoneTotals {
        origins: totals_by(selected.clone(), ORIGIN_ZONE_ID)?,
        destinations: totals_by(selected, DESTINATION_ZONE_ID)?,
    })
}

fn totals_by(selected: LazyFrame, zone_column: &str) -> Result<Vec<ZoneTotal>, AggregationError> {
    let grouped = selected
        .group_by([col(zone_column)])
        .agg([col(TRIPS).sum()])
        .collect()?;

    let zones = grouped.column(zone_column)?.as_materialized_series().u32()?;
    let trips = grouped.column(TRIPS)?.as_materialized_series().f64()?;

    let mut totals: Vec<ZoneTotal> = zones.into_iter()
        .zip(trips)
        .filter_map(|(zone, trips)| Some(ZoneTotal {
            zone: ZoneId(zone?),
            trips: truncate_trips(trips.unwrap_or(0.0)),
        }))
        .collect();
    totals.sort_by_key(|total| total.zone);

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate_by_category;
    use crate::tests::{default_filter, filter, mixed_purposes, two_purposes};
    use common::types::schema::{DayPart, DayType};

    fn pairs(totals: &[ZoneTotal]) -> Vec<(u32, u64)> {
        totals.iter().map(|total| (total.zone.0, total.trips)).collect()
    }

    #[test]
    fn test_two_purposes_of_one_pair() {
        let totals = aggregate_by_zone(&two_purposes(), &default_filter()).unwrap();

        assert_eq!(pairs(&totals.origins), vec![(5, 100)]);
        assert_eq!(pairs(&totals.destinations), vec![(10, 100)]);
    }

    #[test]
    fn test_totals_per_origin_and_destination() {
        let totals = aggregate_by_zone(&mixed_purposes(), &default_filter()).unwrap();

        assert_eq!(pairs(&totals.origins), vec![(1, 21), (2, 7), (3, 2), (4, 0)]);
        assert_eq!(pairs(&totals.destinations), vec![(1, 0), (2, 17), (3, 10), (4, 2)]);
        assert_eq!(totals.origin(ZoneId(1)), Some(21));
        assert_eq!(totals.destination(ZoneId(3)), Some(10));
        assert_eq!(totals.max_origin_trips(), Some(21));
    }

    #[test]
    fn test_zones_without_rows_are_absent() {
        let totals = aggregate_by_zone(
            &mixed_purposes(),
            &filter((1, 2), (3, 3), DayType::AverageDay, [DayPart::AllDay]),
        ).unwrap();

        assert_eq!(pairs(&totals.origins), vec![(1, 3), (2, 7)]);
        assert_eq!(pairs(&totals.destinations), vec![(3, 10)]);
        assert_eq!(totals.origin(ZoneId(4)), None);
    }

    #[test]
    fn test_empty_selection_gives_empty_totals() {
        let inverted = aggregate_by_zone(
            &mixed_purposes(),
            &filter((1, 166), (9, 2), DayType::AverageDay, [DayPart::AllDay]),
        ).unwrap();
        assert_eq!(inverted, ZoneTotals::default());

        let no_match = aggregate_by_zone(
            &mixed_purposes(),
            &filter((1, 166), (1, 166), DayType::AverageWeekendDay, [DayPart::LatePm]),
        ).unwrap();
        assert!(no_match.origins.is_empty() && no_match.destinations.is_empty());
        assert_eq!(no_match.max_origin_trips(), None);
    }

    #[test]
    fn test_category_sum_matches_origin_sum_up_to_truncation() {
        let table = mixed_purposes();
        let filters = [
            default_filter(),
            filter((1, 2), (1, 166), DayType::AverageDay, [DayPart::AllDay]),
            filter((1, 166), (1, 166), DayType::AverageDay, [DayPart::PeakAm, DayPart::PeakPm, DayPart::MidDay]),
            filter((1, 166), (1, 166), DayType::AverageWeekendDay, [DayPart::PeakAm]),
        ];

        for filter in filters {
            let categories = aggregate_by_category(&table, &filter).unwrap();
            let zones = aggregate_by_zone(&table, &filter).unwrap();

            // Every truncated entry loses less than one trip
            let tolerance = categories.rows().len().max(zones.origins.len()) as u64;
            assert!(
                categories.total().abs_diff(zones.origin_total()) <= tolerance,
                "{} vs {} for {filter:?}", categories.total(), zones.origin_total(),
            );
        }
    }
}
