use crate::DataLoadError;
use common::types::schema::{
    Category, DayPart, DayType, DAY_PART, DAY_TYPE, DESTINATION_ZONE_ID, INDEX_COLUMNS, ORIGIN_ZONE_ID,
    TRIPS, TRIP_COUNT_INDEX,
};
use common::types::trip_table::{Provenance, TripTable};
use common::util::df::{distinct_strings, missing_columns};
use itertools::Itertools;
use log::debug;
use polars::frame::DataFrame;
use polars::prelude::{
    col, concat, lit, ChunkAgg, CsvReadOptions, DataType, Expr, IntoLazy, NullValues, SerReader, UnionArgs,
};
use std::path::Path;

/// Reads a wide O-D table and reshapes it into the long-format trip table of dimension `C`.
pub fn load_trip_table<C: Category>(path: &Path, missing_value: &str) -> Result<TripTable<C>, DataLoadError> {
    let wide = read_wide_table(path, missing_value, &required_columns::<C>())?;
    let table = reshape::<C>(wide, path)?;

    debug!(
        target: "loader",
        "Loaded {} {} rows ({} source rows) from {path:?}",
        table.len(), C::DIMENSION, table.provenance().source_rows,
    );

    Ok(table)
}

/// Reads a CSV file (plain or gzip compressed) and makes sure all `required` columns are there.
/// Values equal to `missing_value` are read as nulls.
pub fn read_wide_table(path: &Path, missing_value: &str, required: &[&str]) -> Result<DataFrame, DataLoadError> {
    if !path.is_file() {
        return Err(DataLoadError::MissingFile(path.to_path_buf()));
    }

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|options| {
            options.with_null_values(Some(NullValues::AllColumnsSingle(missing_value.into())))
        })
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let missing = missing_columns(&frame, required);
    if !missing.is_empty() {
        return Err(DataLoadError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing,
        });
    }

    Ok(frame)
}

/// Index columns, trip count index and one percentage column per category
pub fn required_columns<C: Category>() -> Vec<&'static str> {
    INDEX_COLUMNS.into_iter()
        .chain([TRIP_COUNT_INDEX])
        .chain(C::columns())
        .collect_vec()
}

/// Turns one row per O-D/day combination with a percentage column per category into one row per
/// O-D/day combination and category, where `Trips = trip count index * percentage`.
/// Missing values count as zero.
pub fn reshape<C: Category>(wide: DataFrame, path: &Path) -> Result<TripTable<C>, DataLoadError> {
    let projected = wide.lazy()
        .select(projection::<C>())
        .collect()?;

    validate_codes(&projected, DAY_TYPE, DayType::from_code, path)?;
    validate_codes(&projected, DAY_PART, DayPart::from_code, path)?;

    let provenance = Provenance {
        source_rows: projected.height(),
        index_total: projected.column(TRIP_COUNT_INDEX)?
            .as_materialized_series()
            .f64()?
            .sum()
            .unwrap_or(0.0),
    };

    let projected = projected.lazy();
    let per_category = C::ALL.iter()
        .map(|category| {
            projected.clone().select([
                col(ORIGIN_ZONE_ID),
                col(DESTINATION_ZONE_ID),
                col(DAY_TYPE),
                col(DAY_PART),
                lit(category.column()).alias(C::DIMENSION),
                (col(category.column()) * col(TRIP_COUNT_INDEX)).alias(TRIPS),
            ])
        })
        .collect_vec();

    let long = concat(per_category, UnionArgs::default())?.collect()?;

    Ok(TripTable::new(long, provenance)?)
}

fn projection<C: Category>() -> Vec<Expr> {
    let mut exprs = vec![
        col(ORIGIN_ZONE_ID).cast(DataType::UInt32).fill_null(lit(0u32)),
        col(DESTINATION_ZONE_ID).cast(DataType::UInt32).fill_null(lit(0u32)),
        col(DAY_TYPE).cast(DataType::String),
        col(DAY_PART).cast(DataType::String),
        col(TRIP_COUNT_INDEX).cast(DataType::Float64).fill_null(lit(0.0)),
    ];
    exprs.extend(
        C::ALL.iter().map(|category| col(category.column()).cast(DataType::Float64).fill_null(lit(0.0)))
    );
    exprs
}

/// Day types and day parts are closed enumerations, anything else in the file is an integrity error.
/// Only the file codes are valid, a label would never match a filter.
fn validate_codes<T>(
    frame: &DataFrame,
    column: &'static str,
    from_code: fn(&str) -> Option<T>,
    path: &Path,
) -> Result<(), DataLoadError> {
    let unknown = distinct_strings(frame, column)?
        .into_iter()
        .find(|value| value.as_deref().and_then(from_code).is_none());

    match unknown {
        Some(value) => Err(DataLoadError::UnknownValue {
            path: path.to_path_buf(),
            column,
            value,
        }),
        None => Ok(()),
    }
}
