use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Summary of a count-based source (alerts, misalignments).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountInsights {
    pub monthly_data: Vec<MonthlyCount>,
    pub client_breakdown: Vec<ClientCount>,
    pub total_count: u64,
    pub avg_per_month: f64,
    pub unique_clients: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub total: u64,
    /// Distinct clients seen in the month.
    pub clients: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientCount {
    pub client: String,
    pub count: u64,
    pub percentage: f64,
}

/// Summary of the issue tracker. Times are hours, two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueInsights {
    pub monthly_data: Vec<MonthlyIssues>,
    pub client_breakdown: Vec<ClientIssues>,
    pub total_raised: u64,
    pub total_resolved: u64,
    pub avg_resolution_time: f64,
    pub min_resolution_time: f64,
    pub max_resolution_time: f64,
    pub median_resolution_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyIssues {
    pub month: String,
    pub raised: u64,
    pub resolved: u64,
    pub avg_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientIssues {
    pub client: String,
    pub raised: u64,
    pub resolved: u64,
    pub avg_time: f64,
    pub min_time: f64,
    pub max_time: f64,
    pub median_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

impl From<&DashboardError> for ErrorBody {
    fn from(err: &DashboardError) -> Self {
        Self {
            error: err.summary().to_string(),
            details: err.to_string(),
        }
    }
}

/// One section of a snapshot: the insights, or why they are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Section<T> {
    Ready(T),
    Failed(ErrorBody),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub collected_at: DateTime<Utc>,
    pub alerts: Section<CountInsights>,
    pub misalignment: Section<CountInsights>,
    pub issues: Section<IssueInsights>,
}

impl<T> From<Result<T>> for Section<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(ErrorBody::from(&err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_count_insights_serialize_camel_case() {
        let insights = CountInsights {
            monthly_data: vec![MonthlyCount {
                month: "Aug 2025".to_string(),
                total: 2,
                clients: 1,
            }],
            client_breakdown: vec![ClientCount {
                client: "Acme".to_string(),
                count: 2,
                percentage: 100.0,
            }],
            total_count: 2,
            avg_per_month: 2.0,
            unique_clients: 1,
        };

        let value = serde_json::to_value(&insights).unwrap();

        assert_eq!(
            value,
            json!({
                "monthlyData": [{"month": "Aug 2025", "total": 2, "clients": 1}],
                "clientBreakdown": [{"client": "Acme", "count": 2, "percentage": 100.0}],
                "totalCount": 2,
                "avgPerMonth": 2.0,
                "uniqueClients": 1
            })
        );
    }

    #[test]
    fn test_client_issues_serialize_camel_case() {
        let client = ClientIssues {
            client: "Acme".to_string(),
            raised: 3,
            resolved: 2,
            avg_time: 1.5,
            min_time: 1.0,
            max_time: 2.0,
            median_time: 1.5,
        };

        let value = serde_json::to_value(&client).unwrap();

        assert_eq!(value["avgTime"], json!(1.5));
        assert_eq!(value["medianTime"], json!(1.5));
        assert!(value.get("avg_time").is_none());
    }

    #[test]
    fn test_failed_section_serializes_as_error_body() {
        let section = Section::from(Err::<CountInsights, _>(DashboardError::NoData("alerts")));

        let value = serde_json::to_value(&section).unwrap();

        assert_eq!(
            value,
            json!({"error": "No data found", "details": "No data found in alerts"})
        );
    }

    #[test]
    fn test_ready_section_serializes_inline() {
        let section = Section::from(Ok::<u64, DashboardError>(7));

        assert_eq!(serde_json::to_value(&section).unwrap(), json!(7));
    }
}
