use chrono::Utc;
use log::{error, info, warn};

use crate::aggregation::{AlertAggregator, Aggregator, IssueAggregator, MisalignmentAggregator};
use crate::config::Settings;
use crate::error::{DashboardError, Result};
use crate::insights::{CountInsights, DashboardSnapshot, IssueInsights};
use crate::providers::sheets::SheetsClient;

/// Fetches a source and folds it into its summary. Holds no state between
/// calls, so one instance serves any number of concurrent requests.
pub struct Dashboard {
    client: SheetsClient,
    settings: Settings,
}

impl Dashboard {
    pub fn new(settings: Settings) -> Result<Self> {
        let client = SheetsClient::new(&settings.base_url)?;

        Ok(Self { client, settings })
    }

    pub async fn run<A: Aggregator + Sync>(&self, aggregator: &A) -> Result<A::Output> {
        let source = aggregator.source();
        let (api_key, sheet_id) = self.settings.credentials(source.workbook)?;

        let rows = self.client.fetch_rows(api_key, sheet_id, &source).await?;
        aggregator.aggregate(&rows)
    }

    pub async fn alerts(&self) -> Result<CountInsights> {
        self.run(&AlertAggregator).await
    }

    pub async fn misalignment(&self) -> Result<CountInsights> {
        self.run(&MisalignmentAggregator).await
    }

    pub async fn issues(&self) -> Result<IssueInsights> {
        self.run(&IssueAggregator::new(&self.settings.issue_category))
            .await
    }

    /// All three sources, fetched concurrently. A failing source is reported
    /// in its own section and does not hide the others.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        info!("Collecting dashboard snapshot");

        let (alerts, misalignment, issues) =
            tokio::join!(self.alerts(), self.misalignment(), self.issues());

        let failures = [
            alerts.as_ref().err(),
            misalignment.as_ref().err(),
            issues.as_ref().err(),
        ];
        for err in failures.into_iter().flatten() {
            log_failure(err);
        }

        DashboardSnapshot {
            collected_at: Utc::now(),
            alerts: alerts.into(),
            misalignment: misalignment.into(),
            issues: issues.into(),
        }
    }
}

fn log_failure(err: &DashboardError) {
    match err {
        DashboardError::NoData(_) => warn!("{err}"),
        _ => error!("{err}"),
    }
}
