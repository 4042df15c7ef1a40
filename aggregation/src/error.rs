use std::fmt;
use std::fmt::Display;

#[derive(thiserror::Error, Debug)]
pub enum AggregationError {
    Polars(#[from] polars::error::PolarsError),
}

impl Display for AggregationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let err: &dyn Display = match self {
            AggregationError::Polars(err) => err,
        };
        write!(f, "{}", err)
    }
}
