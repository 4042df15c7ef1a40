use itertools::Itertools;
use polars::error::PolarsResult;
use polars::frame::DataFrame;
use polars::prelude::{col, IntoLazy, SortMultipleOptions};

/// Names out of `required` that `frame` doesn't have, in the order they were requested
pub fn missing_columns(frame: &DataFrame, required: &[&str]) -> Vec<String> {
    let present = frame.get_column_names();

    required.iter()
        .filter(|name| !present.iter().any(|p| p.as_str() == **name))
        .map(|name| name.to_string())
        .collect_vec()
}

/// Distinct values of a string column. Nulls are reported as `None`.
pub fn distinct_strings(frame: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let values = frame.column(name)?.as_materialized_series().str()?;

    Ok(values.into_iter()
        .unique()
        .map(|value| value.map(str::to_string))
        .collect_vec())
}

/// Sorts by the given columns, so frames that only differ in row order can be compared
pub fn sort_rows(frame: &DataFrame, by: &[&str]) -> PolarsResult<DataFrame> {
    frame.clone().lazy()
        .sort_by_exprs(
            by.iter().map(|name| col(*name)).collect_vec(),
            SortMultipleOptions::default(),
        )
        .collect()
}
