use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;

use super::month::MonthKey;
use super::stats::{percentage, round_to};
use crate::insights::{ClientCount, CountInsights, MonthlyCount};

#[derive(Debug, Default)]
struct MonthBucket {
    total: u64,
    clients: HashSet<String>,
}

/// Running totals per month and per client for count-based sources.
#[derive(Debug, Default)]
pub struct CountTally {
    months: BTreeMap<MonthKey, MonthBucket>,
    clients: IndexMap<String, u64>,
    total: u64,
}

impl CountTally {
    /// Adds `amount` to the month and client buckets. Returns `false`, leaving
    /// the tally untouched, when the grand total would overflow.
    pub fn record(&mut self, month: MonthKey, client: &str, amount: u64) -> bool {
        // Every bucket is bounded by the grand total.
        let Some(total) = self.total.checked_add(amount) else {
            return false;
        };
        self.total = total;

        let bucket = self.months.entry(month).or_default();
        bucket.total += amount;
        if !bucket.clients.contains(client) {
            bucket.clients.insert(client.to_string());
        }

        *self.clients.entry(client.to_string()).or_insert(0) += amount;
        true
    }

    /// Months come out in calendar order; clients by descending count, ties
    /// in first-seen order.
    pub fn finish(self) -> CountInsights {
        let total_count = self.total;
        let unique_clients = self.clients.len();

        let monthly_data: Vec<MonthlyCount> = self
            .months
            .into_iter()
            .map(|(month, bucket)| MonthlyCount {
                month: month.to_string(),
                total: bucket.total,
                clients: bucket.clients.len(),
            })
            .collect();

        let mut clients: Vec<(String, u64)> = self.clients.into_iter().collect();
        clients.sort_by(|a, b| b.1.cmp(&a.1));

        let client_breakdown = clients
            .into_iter()
            .map(|(client, count)| ClientCount {
                client,
                count,
                percentage: percentage(count, total_count),
            })
            .collect();

        #[allow(clippy::cast_precision_loss)]
        let avg_per_month = if monthly_data.is_empty() {
            0.0
        } else {
            round_to(total_count as f64 / monthly_data.len() as f64, 1)
        };

        CountInsights {
            monthly_data,
            client_breakdown,
            total_count,
            avg_per_month,
            unique_clients,
        }
    }
}
