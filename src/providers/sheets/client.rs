use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::source::SheetSource;
use crate::auth::ApiKey;
use crate::error::{DashboardError, Result};
use crate::providers::Row;

pub struct SheetsClient {
    client: Client,
    base_url: Url,
}

/// Body of `GET /v4/spreadsheets/{id}/values/{range}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeDto {
    #[serde(default)]
    range: Option<String>,
    #[serde(default)]
    values: Vec<Row>,
}

impl SheetsClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sheetpulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DashboardError::Config(format!("Failed to create HTTP client: {e}")))?;

        let base_url = Url::parse(base_url)
            .map_err(|e| DashboardError::Config(format!("Invalid base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DashboardError::Config(format!(
                "Invalid base URL: {base_url} cannot carry a path"
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Construct the values URL for one range of one spreadsheet
    fn values_url(&self, sheet_id: &str, range: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DashboardError::Config(format!("Invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", sheet_id, "values", range]);
        Ok(url)
    }

    /// Fetch every row of `source`, header included. An absent `values`
    /// field (an empty range) yields no rows.
    pub async fn fetch_rows(
        &self,
        api_key: &ApiKey,
        sheet_id: &str,
        source: &SheetSource,
    ) -> Result<Vec<Row>> {
        let url = self.values_url(sheet_id, source.range)?;
        debug!("Requesting {} from {}", source.range, url.path());

        let response = self
            .client
            .get(url)
            .query(&[("key", api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Sheets API returned {status} for {}", source.label);
            return Err(DashboardError::Upstream {
                sheet: source.label,
                status,
            });
        }

        let body = response.json::<ValueRangeDto>().await?;
        info!(
            "Fetched {} rows of {} ({})",
            body.values.len(),
            source.label,
            body.range.as_deref().unwrap_or(source.range)
        );

        Ok(body.values)
    }
}
