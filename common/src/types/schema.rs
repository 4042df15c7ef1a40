//! Fixed taxonomies of the O-D trip tables and the column names they are stored under.
//!
//! Every enumeration keeps its variants in display order, so `ALL` doubles as the output order of
//! aggregations.

use crate::types::errors::InvalidFilterError;
use serde::{Serialize, Serializer};
use std::fmt::Debug;
use std::hash::Hash;
use std::str::FromStr;

pub const ORIGIN_ZONE_ID: &str = "Origin Zone ID";
pub const DESTINATION_ZONE_ID: &str = "Destination Zone ID";
pub const DAY_TYPE: &str = "Day Type";
pub const DAY_PART: &str = "Day Part";

pub const INDEX_COLUMNS: [&str; 4] = [ORIGIN_ZONE_ID, DESTINATION_ZONE_ID, DAY_TYPE, DAY_PART];

/// Raw O-D traffic index, the base every percentage column is multiplied with
pub const TRIP_COUNT_INDEX: &str = "O-D Traffic (StL Index)";

/// Value column of the long-format tables
pub const TRIPS: &str = "Trips";

pub const UNIT_SUFFIX: &str = " (percent)";

/// Removes a single trailing `" (percent)"` annotation. Anything else is left untouched.
pub fn strip_unit_suffix(label: &str) -> &str {
    label.strip_suffix(UNIT_SUFFIX).unwrap_or(label)
}

/// One of the breakdown dimensions of a trip table (purpose, income, duration, length).
pub trait Category: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Name of the long-format column holding the category
    const DIMENSION: &'static str;
    const ALL: &'static [Self];

    fn short_name(self) -> &'static str;

    /// Header of the percentage column in the wide source file
    fn column(self) -> &'static str;

    fn label(self) -> &'static str {
        strip_unit_suffix(self.column())
    }

    fn columns() -> Vec<&'static str> {
        Self::ALL.iter().map(|category| category.column()).collect()
    }

    fn from_column(column: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|category| category.column() == column)
    }
}

macro_rules! category {
    (
        $(#[$meta:meta])*
        $name:ident in $dimension:literal {
            $($variant:ident => ($short:literal, $column:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
        pub enum $name {
            $($variant),+
        }

        impl Category for $name {
            const DIMENSION: &'static str = $dimension;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn short_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $short),+
                }
            }

            fn column(self) -> &'static str {
                match self {
                    $(Self::$variant => $column),+
                }
            }
        }
    };
}

category! {
    /// Home-based work, home-based other, non-home-based
    TripPurpose in "Purpose" {
        Hbw => ("HBW", "Purpose HBW (percent)"),
        Hbo => ("HBO", "Purpose HBO (percent)"),
        Nhb => ("NHB", "Purpose NHB (percent)"),
    }
}

category! {
    /// Annual household income of the travellers
    IncomeBin in "Income" {
        Below20K => ("<20K", "Income Less than 20K (percent)"),
        From20KTo35K => ("20K to 35K", "Income 20K to 35K (percent)"),
        From35KTo50K => ("35K to 50K", "Income 35K to 50K (percent)"),
        From50KTo75K => ("50K to 75K", "Income 50K to 75K (percent)"),
        From75KTo100K => ("75K to 100K", "Income 75K to 100K (percent)"),
        From100KTo125K => ("100K to 125K", "Income 100K to 125K (percent)"),
        From125KTo150K => ("125K to 150K", "Income 125K to 150K (percent)"),
        From150KTo200K => ("150K to 200K", "Income 150K to 200K (percent)"),
        Above200K => ("200K+", "Income More than 200K (percent)"),
    }
}

category! {
    DurationBin in "Duration" {
        Min0To10 => ("0-10 min", "Trip Duration 0-10 min (percent)"),
        Min10To20 => ("10-20 min", "Trip Duration 10-20 min (percent)"),
        Min20To30 => ("20-30 min", "Trip Duration 20-30 min (percent)"),
        Min30To40 => ("30-40 min", "Trip Duration 30-40 min (percent)"),
        Min40To50 => ("40-50 min", "Trip Duration 40-50 min (percent)"),
        Min50To60 => ("50-60 min", "Trip Duration 50-60 min (percent)"),
        Min60To70 => ("60-70 min", "Trip Duration 60-70 min (percent)"),
        Min70To80 => ("70-80 min", "Trip Duration 70-80 min (percent)"),
        Min80To90 => ("80-90 min", "Trip Duration 80-90 min (percent)"),
        Min90To100 => ("90-100 min", "Trip Duration 90-100 min (percent)"),
        Min100To110 => ("100-110 min", "Trip Duration 100-110 min (percent)"),
        Min110To120 => ("110-120 min", "Trip Duration 110-120 min (percent)"),
        Min120To130 => ("120-130 min", "Trip Duration 120-130 min (percent)"),
        Min130To140 => ("130-140 min", "Trip Duration 130-140 min (percent)"),
        Min140To150 => ("140-150 min", "Trip Duration 140-150 min (percent)"),
        Min150Plus => ("150+ min", "Trip Duration 150+ min (percent)"),
    }
}

category! {
    LengthBin in "Length" {
        Mi0To1 => ("0-1 mi", "Trip Length 0-1 mi (percent)"),
        Mi1To2 => ("1-2 mi", "Trip Length 1-2 mi (percent)"),
        Mi2To5 => ("2-5 mi", "Trip Length 2-5 mi (percent)"),
        Mi5To10 => ("5-10 mi", "Trip Length 5-10 mi (percent)"),
        Mi10To20 => ("10-20 mi", "Trip Length 10-20 mi (percent)"),
        Mi20To30 => ("20-30 mi", "Trip Length 20-30 mi (percent)"),
        Mi30To40 => ("30-40 mi", "Trip Length 30-40 mi (percent)"),
        Mi40To50 => ("40-50 mi", "Trip Length 40-50 mi (percent)"),
        Mi50To60 => ("50-60 mi", "Trip Length 50-60 mi (percent)"),
        Mi60To70 => ("60-70 mi", "Trip Length 60-70 mi (percent)"),
        Mi70To80 => ("70-80 mi", "Trip Length 70-80 mi (percent)"),
        Mi80To90 => ("80-90 mi", "Trip Length 80-90 mi (percent)"),
        Mi90To100 => ("90-100 mi", "Trip Length 90-100 mi (percent)"),
        Mi100Plus => ("100+ mi", "Trip Length 100+ mi (percent)"),
    }
}

/// Which days a row is averaged over
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Default)]
pub enum DayType {
    #[default]
    AverageDay,
    AverageWeekday,
    AverageWeekendDay,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::AverageDay, DayType::AverageWeekday, DayType::AverageWeekendDay];

    pub fn label(self) -> &'static str {
        match self {
            DayType::AverageDay => "Average Day (M-Su)",
            DayType::AverageWeekday => "Average Weekday (M-F)",
            DayType::AverageWeekendDay => "Average Weekend Day (Sa-Su)",
        }
    }

    /// The value as it is written in the `Day Type` column
    pub fn code(self) -> &'static str {
        match self {
            DayType::AverageDay => "0: Average Day (M-Su)",
            DayType::AverageWeekday => "1: Average Weekday (M-F)",
            DayType::AverageWeekendDay => "2: Average Weekend Day (Sa-Su)",
        }
    }

    /// Parses a `Day Type` column value. Labels are not accepted here.
    pub fn from_code(code: &str) -> Option<Self> {
        DayType::ALL.into_iter().find(|day_type| day_type.code() == code)
    }
}

impl FromStr for DayType {
    type Err = InvalidFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayType::ALL.into_iter()
            .find(|day_type| day_type.label() == s || day_type.code() == s)
            .ok_or_else(|| InvalidFilterError::UnknownDayType(s.to_string()))
    }
}

// Serialized as the label, the same string a UI sends back in a filter
impl Serialize for DayType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A period of the day. `AllDay` is the 24 hour aggregate, not the union of the other parts.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Default)]
pub enum DayPart {
    #[default]
    AllDay,
    EarlyAm,
    PeakAm,
    MidDay,
    PeakPm,
    LatePm,
}

impl DayPart {
    pub const ALL: [DayPart; 6] = [
        DayPart::AllDay,
        DayPart::EarlyAm,
        DayPart::PeakAm,
        DayPart::MidDay,
        DayPart::PeakPm,
        DayPart::LatePm,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DayPart::AllDay => "All Day (12am-12am)",
            DayPart::EarlyAm => "Early AM (12am-6am)",
            DayPart::PeakAm => "Peak AM (6am-10am)",
            DayPart::MidDay => "Mid-Day (10am-3pm)",
            DayPart::PeakPm => "Peak PM (3pm-7pm)",
            DayPart::LatePm => "Late PM (7pm-12am)",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            DayPart::AllDay => "0: All Day (12am-12am)",
            DayPart::EarlyAm => "1: Early AM (12am-6am)",
            DayPart::PeakAm => "2: Peak AM (6am-10am)",
            DayPart::MidDay => "3: Mid-Day (10am-3pm)",
            DayPart::PeakPm => "4: Peak PM (3pm-7pm)",
            DayPart::LatePm => "5: Late PM (7pm-12am)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        DayPart::ALL.into_iter().find(|day_part| day_part.code() == code)
    }
}

impl FromStr for DayPart {
    type Err = InvalidFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayPart::ALL.into_iter()
            .find(|day_part| day_part.label() == s || day_part.code() == s)
            .ok_or_else(|| InvalidFilterError::UnknownDayPart(s.to_string()))
    }
}

impl Serialize for DayPart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Selects one of the four trip tables at runtime, e.g. from a request path
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Dimension {
    Purpose,
    Income,
    Duration,
    Length,
}

impl FromStr for Dimension {
    type Err = InvalidFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "purpose" => Ok(Dimension::Purpose),
            "income" => Ok(Dimension::Income),
            "duration" => Ok(Dimension::Duration),
            "length" => Ok(Dimension::Length),
            _ => Err(InvalidFilterError::UnknownDimension(s.to_string())),
        }
    }
}
