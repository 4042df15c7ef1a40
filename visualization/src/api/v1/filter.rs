use common::types::errors::InvalidFilterError;
use common::types::filter::{FilterSpec, RawFilterSpec};
use common::types::schema::{DayPart, DayType};
use common::types::ZoneId;
use data_loader::LoadedData;
use serde::Deserialize;
use crate::ServerError;

/// Filter as query parameters, e.g.
/// `?day_type=Average Weekday (M-F)&day_parts=Peak AM (6am-10am),Peak PM (3pm-7pm)&origin_lo=1&origin_hi=20`
///
/// Everything is optional: the default is the average day, all day, over all zones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    pub day_type: Option<String>,
    /// Comma separated day part labels
    pub day_parts: Option<String>,
    pub origin_lo: Option<u32>,
    pub origin_hi: Option<u32>,
    pub destination_lo: Option<u32>,
    pub destination_hi: Option<u32>,
}

impl FilterQuery {
    /// Fills in the defaults. `extent` is the zone id extent of the loaded tables, which the zone
    /// ranges default to.
    pub fn into_raw(self, extent: Option<(ZoneId, ZoneId)>) -> RawFilterSpec {
        // Without any rows every range selects nothing anyway
        let (lo, hi) = extent.map_or((0, 0), |(lo, hi)| (lo.0, hi.0));

        let day_parts = match self.day_parts {
            Some(day_parts) => day_parts.split(',')
                .map(str::trim)
                .filter(|day_part| !day_part.is_empty())
                .map(str::to_string)
                .collect(),
            None => vec![DayPart::AllDay.label().to_string()],
        };

        RawFilterSpec {
            day_type: self.day_type.unwrap_or_else(|| DayType::AverageDay.label().to_string()),
            day_parts,
            origin: (self.origin_lo.unwrap_or(lo), self.origin_hi.unwrap_or(hi)),
            destination: (self.destination_lo.unwrap_or(lo), self.destination_hi.unwrap_or(hi)),
        }
    }

    pub fn to_filter(&self, extent: Option<(ZoneId, ZoneId)>) -> Result<FilterSpec, InvalidFilterError> {
        FilterSpec::try_from(self.clone().into_raw(extent))
    }

    pub(crate) fn resolve(&self, data: &LoadedData) -> Result<FilterSpec, ServerError> {
        Ok(self.to_filter(data.zone_extent()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::filter::ZoneRange;

    const EXTENT: Option<(ZoneId, ZoneId)> = Some((ZoneId(1), ZoneId(166)));

    #[test]
    fn test_defaults() {
        let filter = FilterQuery::default().to_filter(EXTENT).unwrap();

        assert_eq!(filter.day_type(), DayType::AverageDay);
        assert_eq!(filter.day_parts(), &[DayPart::AllDay]);
        assert_eq!(filter.origin(), ZoneRange::new(1, 166));
        assert_eq!(filter.destination(), ZoneRange::new(1, 166));
    }

    #[test]
    fn test_explicit_values() {
        let query = FilterQuery {
            day_type: Some("Average Weekend Day (Sa-Su)".to_string()),
            day_parts: Some("Peak PM (3pm-7pm), Peak AM (6am-10am)".to_string()),
            origin_lo: Some(10),
            origin_hi: None,
            destination_lo: None,
            destination_hi: Some(20),
        };
        let filter = query.to_filter(EXTENT).unwrap();

        assert_eq!(filter.day_type(), DayType::AverageWeekendDay);
        assert_eq!(filter.day_parts(), &[DayPart::PeakAm, DayPart::PeakPm]);
        assert_eq!(filter.origin(), ZoneRange::new(10, 166));
        assert_eq!(filter.destination(), ZoneRange::new(1, 20));
    }

    #[test]
    fn test_all_day_wins() {
        let query = FilterQuery {
            day_parts: Some("Peak AM (6am-10am),All Day (12am-12am)".to_string()),
            ..FilterQuery::default()
        };

        assert_eq!(query.to_filter(EXTENT).unwrap().day_parts(), &[DayPart::AllDay]);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let unknown_day_type = FilterQuery { day_type: Some("Holiday".to_string()), ..FilterQuery::default() };
        assert_eq!(
            unknown_day_type.to_filter(EXTENT),
            Err(InvalidFilterError::UnknownDayType("Holiday".to_string()))
        );

        let no_day_parts = FilterQuery { day_parts: Some(" , ".to_string()), ..FilterQuery::default() };
        assert_eq!(no_day_parts.to_filter(EXTENT), Err(InvalidFilterError::NoDayParts));
    }
}
