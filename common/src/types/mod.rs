use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod errors;
pub mod filter;
pub mod schema;
pub mod trip_table;
pub mod zone;

// Zone ids are whatever the source files use. They are not guaranteed to be continuous, so don't
// use them as indices.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub u32);

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
