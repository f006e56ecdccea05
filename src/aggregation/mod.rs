//! Row filtering, bucketing and formatting for each data source.

mod alerts;
mod issues;
mod misalignment;
mod month;
mod schema;
mod stats;
mod tally;
mod timestamp;

pub use alerts::AlertAggregator;
pub use issues::IssueAggregator;
pub use misalignment::MisalignmentAggregator;

use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::providers::sheets::SheetSource;
use crate::providers::Row;

/// A single-pass fold from raw sheet rows to a serializable summary.
///
/// Implementations are pure: the same rows always produce the same output.
pub trait Aggregator {
    type Output: Serialize + Send;

    fn source(&self) -> SheetSource;

    fn aggregate(&self, rows: &[Row]) -> Result<Self::Output>;
}

/// Split off the header row. A source needs a header and at least one data row.
fn split_header<'a>(rows: &'a [Row], source: &SheetSource) -> Result<(&'a Row, &'a [Row])> {
    match rows.split_first() {
        Some((header, data)) if !data.is_empty() => Ok((header, data)),
        _ => Err(DashboardError::NoData(source.label)),
    }
}

/// Trimmed cell content; missing and blank cells are `None`.
fn cell(row: &[String], index: usize) -> Option<&str> {
    row.get(index).map(|c| c.trim()).filter(|c| !c.is_empty())
}

#[cfg(test)]
pub(crate) fn rows(data: &[&[&str]]) -> Vec<Row> {
    data.iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect()
}
