use std::fmt;
use std::fmt::Formatter;

/// A filter that can't be mapped onto the fixed enumerations. The UI only offers enumerated
/// choices, so this points at an integration problem rather than at the user.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum InvalidFilterError {
    UnknownDayType(String),
    UnknownDayPart(String),
    UnknownDimension(String),
    NoDayParts,
}

impl fmt::Display for InvalidFilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidFilterError::UnknownDayType(value) => write!(f, "Unknown day type '{value}'"),
            InvalidFilterError::UnknownDayPart(value) => write!(f, "Unknown day part '{value}'"),
            InvalidFilterError::UnknownDimension(value) => write!(f, "Unknown dimension '{value}'"),
            InvalidFilterError::NoDayParts => write!(f, "At least one day part must be selected"),
        }
    }
}
