use crate::types::errors::InvalidFilterError;
use crate::types::schema::{DayPart, DayType};
use crate::types::ZoneId;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Inclusive range of zone ids. An inverted range (`lo > hi`) is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRange {
    pub lo: ZoneId,
    pub hi: ZoneId,
}

impl ZoneRange {
    pub fn new(lo: u32, hi: u32) -> Self {
        Self { lo: ZoneId(lo), hi: ZoneId(hi) }
    }

    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    pub fn contains(&self, zone: ZoneId) -> bool {
        self.lo <= zone && zone <= self.hi
    }

    /// Number of zone ids covered by the range
    pub fn len(&self) -> u32 {
        if self.is_empty() { 0 } else { self.hi.0 - self.lo.0 + 1 }
    }
}

/// Row selection shared by all aggregations.
///
/// The day parts are normalized on construction: duplicates are removed, the parts are kept in
/// enumeration order, and if `All Day` is selected it replaces every other part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    origin: ZoneRange,
    destination: ZoneRange,
    day_type: DayType,
    day_parts: Vec<DayPart>,
}

impl FilterSpec {
    pub fn new(
        origin: ZoneRange,
        destination: ZoneRange,
        day_type: DayType,
        day_parts: impl IntoIterator<Item = DayPart>,
    ) -> Self {
        Self {
            origin,
            destination,
            day_type,
            day_parts: normalize_day_parts(day_parts),
        }
    }

    pub fn origin(&self) -> ZoneRange {
        self.origin
    }

    pub fn destination(&self) -> ZoneRange {
        self.destination
    }

    pub fn day_type(&self) -> DayType {
        self.day_type
    }

    pub fn day_parts(&self) -> &[DayPart] {
        &self.day_parts
    }
}

fn normalize_day_parts(day_parts: impl IntoIterator<Item = DayPart>) -> Vec<DayPart> {
    let day_parts = day_parts.into_iter().sorted().dedup().collect_vec();

    if day_parts.contains(&DayPart::AllDay) {
        vec![DayPart::AllDay]
    } else {
        day_parts
    }
}

/// Filter values the way a UI hands them over: labels (or file codes) instead of enum values.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFilterSpec {
    pub day_type: String,
    pub day_parts: Vec<String>,
    pub origin: (u32, u32),
    pub destination: (u32, u32),
}

impl TryFrom<RawFilterSpec> for FilterSpec {
    type Error = InvalidFilterError;

    fn try_from(raw: RawFilterSpec) -> Result<Self, Self::Error> {
        if raw.day_parts.is_empty() {
            return Err(InvalidFilterError::NoDayParts);
        }

        let day_type = raw.day_type.parse::<DayType>()?;
        let day_parts = raw.day_parts.iter()
            .map(|day_part| day_part.parse::<DayPart>())
            .collect::<Result<Vec<DayPart>, InvalidFilterError>>()?;

        Ok(FilterSpec::new(
            ZoneRange::new(raw.origin.0, raw.origin.1),
            ZoneRange::new(raw.destination.0, raw.destination.1),
            day_type,
            day_parts,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_range() -> ZoneRange {
        ZoneRange::new(1, 166)
    }

    #[test]
    fn test_all_day_replaces_other_parts() {
        let with_peak = FilterSpec::new(full_range(), full_range(), DayType::AverageDay, [DayPart::PeakAm, DayPart::AllDay]);
        let alone = FilterSpec::new(full_range(), full_range(), DayType::AverageDay, [DayPart::AllDay]);

        assert_eq!(with_peak.day_parts(), &[DayPart::AllDay]);
        assert_eq!(with_peak, alone);
    }

    #[test]
    fn test_day_parts_are_deduplicated_in_enumeration_order() {
        let filter = FilterSpec::new(
            full_range(),
            full_range(),
            DayType::AverageWeekday,
            [DayPart::LatePm, DayPart::PeakAm, DayPart::LatePm],
        );

        assert_eq!(filter.day_parts(), &[DayPart::PeakAm, DayPart::LatePm]);
    }

    #[test]
    fn test_zone_range() {
        let range = ZoneRange::new(5, 10);
        assert!(range.contains(ZoneId(5)));
        assert!(range.contains(ZoneId(10)));
        assert!(!range.contains(ZoneId(11)));
        assert_eq!(range.len(), 6);

        let inverted = ZoneRange::new(10, 5);
        assert!(inverted.is_empty());
        assert!(!inverted.contains(ZoneId(7)));
        assert_eq!(inverted.len(), 0);
    }

    #[test]
    fn test_raw_filter_conversion() {
        let raw = RawFilterSpec {
            day_type: "Average Weekend Day (Sa-Su)".into(),
            day_parts: vec!["Peak AM (6am-10am)".into(), "Mid-Day (10am-3pm)".into()],
            origin: (1, 20),
            destination: (3, 4),
        };

        let filter = FilterSpec::try_from(raw).unwrap();
        assert_eq!(filter.day_type(), DayType::AverageWeekendDay);
        assert_eq!(filter.day_parts(), &[DayPart::PeakAm, DayPart::MidDay]);
        assert_eq!(filter.origin(), ZoneRange::new(1, 20));
        assert_eq!(filter.destination(), ZoneRange::new(3, 4));
    }

    #[test]
    fn test_raw_filter_rejects_unknown_values() {
        let raw = RawFilterSpec {
            day_type: "Average Day (M-Su)".into(),
            day_parts: vec!["Night".into()],
            origin: (1, 166),
            destination: (1, 166),
        };
        assert_eq!(FilterSpec::try_from(raw), Err(InvalidFilterError::UnknownDayPart("Night".into())));

        let raw = RawFilterSpec {
            day_type: "Average Day (M-Su)".into(),
            day_parts: vec![],
            origin: (1, 166),
            destination: (1, 166),
        };
        assert_eq!(FilterSpec::try_from(raw), Err(InvalidFilterError::NoDayParts));
    }

    #[test]
    fn test_filter_serializes_with_labels() {
        let filter = FilterSpec::new(ZoneRange::new(1, 20), full_range(), DayType::AverageDay, [DayPart::PeakPm]);

        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            serde_json::json!({
                "origin": {"lo": 1, "hi": 20},
                "destination": {"lo": 1, "hi": 166},
                "day_type": "Average Day (M-Su)",
                "day_parts": ["Peak PM (3pm-7pm)"],
            })
        );
    }
}
