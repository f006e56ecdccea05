use log::debug;

use super::month::{parse_day_month_year, MonthKey};
use super::tally::CountTally;
use super::{cell, split_header, Aggregator};
use crate::error::Result;
use crate::insights::CountInsights;
use crate::providers::sheets::{SheetSource, ALERTS};
use crate::providers::Row;

/// Alert type recorded on days when nothing fired.
pub const NO_ALERTS_MARKER: &str = "No L2 alerts found";

const DATE: usize = 0;
const CLIENT: usize = 1;
const ALERT_TYPE: usize = 2;

/// Alert tracking: one row per alert, columns `[date, client, alert type, ..]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlertAggregator;

impl Aggregator for AlertAggregator {
    type Output = CountInsights;

    fn source(&self) -> SheetSource {
        ALERTS
    }

    fn aggregate(&self, rows: &[Row]) -> Result<CountInsights> {
        let (_, data) = split_header(rows, &ALERTS)?;

        let mut tally = CountTally::default();
        let mut skipped = 0;
        for row in data {
            let recorded =
                alert_entry(row).is_some_and(|(month, client)| tally.record(month, client, 1));
            if !recorded {
                skipped += 1;
            }
        }

        if skipped > 0 {
            debug!("Skipped {skipped} of {} alert rows", data.len());
        }

        Ok(tally.finish())
    }
}

fn alert_entry(row: &[String]) -> Option<(MonthKey, &str)> {
    let alert_type = cell(row, ALERT_TYPE)?;
    if alert_type.eq_ignore_ascii_case(NO_ALERTS_MARKER) {
        return None;
    }

    let client = cell(row, CLIENT)?;
    let date = parse_day_month_year(cell(row, DATE)?)?;

    Some((MonthKey::of(&date), client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::rows;
    use crate::error::DashboardError;
    use crate::insights::{ClientCount, MonthlyCount};

    const HEADER: &[&str] = &["Date", "Client", "Alert Type", "Camera", "Notes", "By"];

    #[test]
    fn test_aggregate_monthly_and_client_breakdown() {
        let rows = rows(&[
            HEADER,
            &["10-08-2025", "Acme", "Alert"],
            &["15-08-2025", "Acme", "Alert"],
            &["01-09-2025", "Beta", "Alert"],
        ]);

        let insights = AlertAggregator.aggregate(&rows).unwrap();

        assert_eq!(
            insights.monthly_data,
            vec![
                MonthlyCount {
                    month: "Aug 2025".to_string(),
                    total: 2,
                    clients: 1
                },
                MonthlyCount {
                    month: "Sep 2025".to_string(),
                    total: 1,
                    clients: 1
                },
            ]
        );
        assert_eq!(
            insights.client_breakdown,
            vec![
                ClientCount {
                    client: "Acme".to_string(),
                    count: 2,
                    percentage: 66.7
                },
                ClientCount {
                    client: "Beta".to_string(),
                    count: 1,
                    percentage: 33.3
                },
            ]
        );
        assert_eq!(insights.total_count, 3);
        assert_eq!(insights.avg_per_month, 1.5);
        assert_eq!(insights.unique_clients, 2);
    }

    #[test]
    fn test_no_alerts_marker_is_excluded_everywhere() {
        let rows = rows(&[
            HEADER,
            &["10-08-2025", "Acme", "Camera offline"],
            &["11-08-2025", "Quiet Co", NO_ALERTS_MARKER],
            &["12-10-2025", "Quiet Co", "no l2 alerts found"],
        ]);

        let insights = AlertAggregator.aggregate(&rows).unwrap();

        assert_eq!(insights.total_count, 1);
        assert_eq!(insights.unique_clients, 1);
        assert_eq!(insights.monthly_data.len(), 1);
        assert!(insights
            .client_breakdown
            .iter()
            .all(|c| c.client != "Quiet Co"));
    }

    #[test]
    fn test_rows_missing_fields_are_skipped() {
        let rows = rows(&[
            HEADER,
            &["10-08-2025", "Acme", "Alert"],
            &["", "Acme", "Alert"],
            &["10-08-2025", "  ", "Alert"],
            &["10-08-2025", "Acme"],
            &["10/08/2025", "Acme", "Alert"],
            &["32-08-2025", "Acme", "Alert"],
        ]);

        let insights = AlertAggregator.aggregate(&rows).unwrap();

        assert_eq!(insights.total_count, 1);
        assert_eq!(insights.client_breakdown[0].percentage, 100.0);
    }

    #[test]
    fn test_breakdown_sum_matches_total() {
        let rows = rows(&[
            HEADER,
            &["01-01-2025", "Acme", "Alert"],
            &["02-02-2025", "Beta", "Alert"],
            &["03-02-2025", "Gamma", "Alert"],
            &["04-03-2025", "Beta", "Alert"],
            &["05-03-2025", "", "Alert"],
            &["06-03-2025", "Delta", NO_ALERTS_MARKER],
        ]);

        let insights = AlertAggregator.aggregate(&rows).unwrap();
        let sum: u64 = insights.client_breakdown.iter().map(|c| c.count).sum();

        assert_eq!(sum, insights.total_count);
        assert_eq!(insights.total_count, 4);
    }

    #[test]
    fn test_header_only_is_no_data() {
        let err = AlertAggregator.aggregate(&rows(&[HEADER])).unwrap_err();

        assert!(matches!(err, DashboardError::NoData(_)));
    }

    #[test]
    fn test_only_filtered_rows_yields_empty_summary() {
        let rows = rows(&[HEADER, &["10-08-2025", "Acme", NO_ALERTS_MARKER]]);

        let insights = AlertAggregator.aggregate(&rows).unwrap();

        assert_eq!(insights.total_count, 0);
        assert!(insights.monthly_data.is_empty());
        assert_eq!(insights.avg_per_month, 0.0);
    }
}
