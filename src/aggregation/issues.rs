use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::debug;

use super::month::MonthKey;
use super::schema::IssueColumns;
use super::stats::{max, mean, median, min, round_to};
use super::timestamp::{elapsed_hours, parse_timestamp};
use super::{cell, split_header, Aggregator};
use crate::config::DEFAULT_ISSUE_CATEGORY;
use crate::error::Result;
use crate::insights::{ClientIssues, IssueInsights, MonthlyIssues};
use crate::providers::sheets::{SheetSource, ISSUES};
use crate::providers::Row;

const UNKNOWN_CLIENT: &str = "Unknown";

/// Issue tracking, restricted to one sub-request category.
#[derive(Debug, Clone)]
pub struct IssueAggregator {
    /// Lowercased category fragment matched against the sub-request type.
    category: String,
}

impl IssueAggregator {
    pub fn new(category: &str) -> Self {
        Self {
            category: category.trim().to_lowercase(),
        }
    }

    fn in_category(&self, row: &[String], columns: &IssueColumns) -> bool {
        cell(row, columns.sub_request)
            .is_some_and(|sub_request| sub_request.to_lowercase().contains(&self.category))
    }
}

impl Default for IssueAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_ISSUE_CATEGORY)
    }
}

#[derive(Debug, Default)]
struct IssueBucket {
    raised: u64,
    resolved: u64,
    hours: Vec<f64>,
}

impl IssueBucket {
    fn record(&mut self, resolution_hours: Option<f64>) {
        self.raised += 1;
        if let Some(hours) = resolution_hours {
            self.resolved += 1;
            self.hours.push(hours);
        }
    }

    fn avg_time(&self) -> f64 {
        round_to(mean(&self.hours), 2)
    }
}

#[derive(Debug, Default)]
struct IssueTally {
    months: BTreeMap<MonthKey, IssueBucket>,
    clients: IndexMap<String, IssueBucket>,
    overall: IssueBucket,
}

impl IssueTally {
    fn record(&mut self, month: MonthKey, client: &str, resolution_hours: Option<f64>) {
        self.months.entry(month).or_default().record(resolution_hours);
        self.clients
            .entry(client.to_string())
            .or_default()
            .record(resolution_hours);
        self.overall.record(resolution_hours);
    }

    fn finish(self) -> IssueInsights {
        let monthly_data = self
            .months
            .into_iter()
            .map(|(month, bucket)| MonthlyIssues {
                month: month.to_string(),
                raised: bucket.raised,
                resolved: bucket.resolved,
                avg_time: bucket.avg_time(),
            })
            .collect();

        let mut clients: Vec<(String, IssueBucket)> = self
            .clients
            .into_iter()
            .filter(|(_, bucket)| bucket.raised > 0)
            .collect();
        clients.sort_by(|a, b| b.1.raised.cmp(&a.1.raised));

        let client_breakdown = clients
            .into_iter()
            .map(|(client, bucket)| ClientIssues {
                avg_time: bucket.avg_time(),
                min_time: round_to(min(&bucket.hours), 2),
                max_time: round_to(max(&bucket.hours), 2),
                median_time: round_to(median(&bucket.hours), 2),
                client,
                raised: bucket.raised,
                resolved: bucket.resolved,
            })
            .collect();

        let overall = self.overall;
        IssueInsights {
            monthly_data,
            client_breakdown,
            total_raised: overall.raised,
            total_resolved: overall.resolved,
            avg_resolution_time: overall.avg_time(),
            min_resolution_time: round_to(min(&overall.hours), 2),
            max_resolution_time: round_to(max(&overall.hours), 2),
            median_resolution_time: round_to(median(&overall.hours), 2),
        }
    }
}

impl Aggregator for IssueAggregator {
    type Output = IssueInsights;

    fn source(&self) -> SheetSource {
        ISSUES
    }

    fn aggregate(&self, rows: &[Row]) -> Result<IssueInsights> {
        let (header, data) = split_header(rows, &ISSUES)?;
        let columns = IssueColumns::resolve(header)?;
        debug!("Issue columns: {columns:?}");

        let mut tally = IssueTally::default();
        let mut in_category = 0;
        for row in data.iter().filter(|row| self.in_category(row, &columns)) {
            in_category += 1;
            if let Some((month, client, hours)) = issue_entry(row, &columns) {
                tally.record(month, client, hours);
            }
        }

        debug!(
            "{in_category} of {} issue rows match '{}'",
            data.len(),
            self.category
        );

        Ok(tally.finish())
    }
}

/// Month, client and resolution hours of one issue. Resolution hours are
/// present only when the resolved timestamp parses and is not before the
/// raised one.
fn issue_entry<'a>(
    row: &'a [String],
    columns: &IssueColumns,
) -> Option<(MonthKey, &'a str, Option<f64>)> {
    let raised = parse_timestamp(cell(row, columns.raised)?)?;
    let client = columns
        .client
        .and_then(|index| cell(row, index))
        .unwrap_or(UNKNOWN_CLIENT);
    let hours = columns
        .resolved
        .and_then(|index| cell(row, index))
        .and_then(parse_timestamp)
        .and_then(|resolved| elapsed_hours(&raised, &resolved));

    Some((MonthKey::of(&raised.local), client, hours))
}
