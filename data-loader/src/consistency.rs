//! The four trip tables are derived from three files that each contain the complete set of O-D
//! rows. Zone totals are only computed on the purpose table, which is only sound as long as the
//! files agree with each other.

use crate::LoadedData;
use common::types::schema::Category;
use common::types::trip_table::TripTable;
use log::{debug, warn};
use polars::error::PolarsResult;
use std::fmt;
use std::fmt::Display;

/// Relative difference up to which two index totals are considered equal
const INDEX_TOTAL_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    pub dimension: &'static str,
    pub source_rows: usize,
    pub index_total: f64,
    /// Sum of all category trips, equal to `index_total` if the shares of every row add up to one
    pub category_total: f64,
}

impl TableSummary {
    pub fn of<C: Category>(table: &TripTable<C>) -> PolarsResult<Self> {
        let provenance = table.provenance();

        Ok(Self {
            dimension: C::DIMENSION,
            source_rows: provenance.source_rows,
            index_total: provenance.index_total,
            category_total: table.total_trips()?,
        })
    }

    /// Share of the trip count index that is covered by the categories
    pub fn coverage(&self) -> Option<f64> {
        (self.index_total > 0.0).then(|| self.category_total / self.index_total)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConsistencyIssue {
    RowCountMismatch {
        dimension: &'static str,
        expected: usize,
        actual: usize,
    },
    IndexTotalMismatch {
        dimension: &'static str,
        expected: f64,
        actual: f64,
    },
}

impl Display for ConsistencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyIssue::RowCountMismatch { dimension, expected, actual } => write!(
                f, "{dimension} table has {actual} O-D rows, but the purpose table has {expected}"
            ),
            ConsistencyIssue::IndexTotalMismatch { dimension, expected, actual } => write!(
                f, "{dimension} table has a trip count index total of {actual}, but the purpose table has {expected}"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyReport {
    pub tables: Vec<TableSummary>,
    pub issues: Vec<ConsistencyIssue>,
}

impl ConsistencyReport {
    /// Compares every table against the first one
    pub fn from_summaries(tables: Vec<TableSummary>) -> Self {
        let issues = match tables.split_first() {
            Some((reference, others)) => others.iter()
                .flat_map(|table| compare(reference, table))
                .collect(),
            None => vec![],
        };

        Self { tables, issues }
    }

    pub fn is_consistent(&self) -> bool {
        self.issues.is_empty()
    }
}

fn compare(reference: &TableSummary, table: &TableSummary) -> Vec<ConsistencyIssue> {
    let mut issues = vec![];

    if reference.source_rows != table.source_rows {
        issues.push(ConsistencyIssue::RowCountMismatch {
            dimension: table.dimension,
            expected: reference.source_rows,
            actual: table.source_rows,
        });
    }

    let scale = reference.index_total.abs().max(table.index_total.abs()).max(1.0);
    if (reference.index_total - table.index_total).abs() / scale > INDEX_TOTAL_TOLERANCE {
        issues.push(ConsistencyIssue::IndexTotalMismatch {
            dimension: table.dimension,
            expected: reference.index_total,
            actual: table.index_total,
        });
    }

    issues
}

/// Checks that all trip tables were derived from the same O-D rows. Problems are logged as
/// warnings and returned, they never abort loading.
pub fn check_consistency(data: &LoadedData) -> PolarsResult<ConsistencyReport> {
    let report = ConsistencyReport::from_summaries(vec![
        TableSummary::of(&data.purpose)?,
        TableSummary::of(&data.income)?,
        TableSummary::of(&data.duration)?,
        TableSummary::of(&data.length)?,
    ]);

    for table in &report.tables {
        match table.coverage() {
            Some(coverage) => debug!(
                target: "loader",
                "{} categories cover {:.1}% of the trip count index", table.dimension, coverage * 100.0
            ),
            None => debug!(target: "loader", "{} table has no trips", table.dimension),
        }
    }
    for issue in &report.issues {
        warn!(target: "loader", "Inconsistent input files: {issue}");
    }

    Ok(report)
}
