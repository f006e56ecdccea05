use log::debug;

use super::month::{parse_day_month_year, MonthKey};
use super::schema::MisalignmentColumns;
use super::tally::CountTally;
use super::{cell, split_header, Aggregator};
use crate::error::Result;
use crate::insights::CountInsights;
use crate::providers::sheets::{SheetSource, MISALIGNMENT};
use crate::providers::Row;

/// Misalignment tracking: each row carries a count, and buckets sum the
/// counts rather than the rows.
#[derive(Debug, Default, Clone, Copy)]
pub struct MisalignmentAggregator;

impl Aggregator for MisalignmentAggregator {
    type Output = CountInsights;

    fn source(&self) -> SheetSource {
        MISALIGNMENT
    }

    fn aggregate(&self, rows: &[Row]) -> Result<CountInsights> {
        let (header, data) = split_header(rows, &MISALIGNMENT)?;
        let columns = MisalignmentColumns::resolve(header)?;
        debug!("Misalignment columns: {columns:?}");

        let mut tally = CountTally::default();
        let mut skipped = 0;
        for row in data {
            let recorded = misalignment_entry(row, &columns)
                .is_some_and(|(month, client, count)| tally.record(month, client, count));
            if !recorded {
                skipped += 1;
            }
        }

        if skipped > 0 {
            debug!("Skipped {skipped} of {} misalignment rows", data.len());
        }

        Ok(tally.finish())
    }
}

fn misalignment_entry<'a>(
    row: &'a [String],
    columns: &MisalignmentColumns,
) -> Option<(MonthKey, &'a str, u64)> {
    let count = cell(row, columns.count).and_then(parse_count)?;
    let client = cell(row, columns.client)?;
    let date = parse_day_month_year(cell(row, columns.date)?)?;

    Some((MonthKey::of(&date), client, count))
}

/// Leading integer of a count cell (`"3"`, `"+3"`, `"3 cameras"`).
/// Zero, negative and non-numeric counts are `None`, so correction rows with a
/// negative count never reduce a total.
fn parse_count(cell: &str) -> Option<u64> {
    let digits = cell.strip_prefix('+').unwrap_or(cell);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<u64>().ok().filter(|&n| n > 0)
}
