use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to fetch {sheet}: {status}")]
    Upstream {
        sheet: &'static str,
        status: StatusCode,
    },

    #[error("No data found in {0}")]
    NoData(&'static str),

    #[error("Required columns not found: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Short, client-facing description used as the `error` field of error bodies.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Config(_) => "Missing API key or Sheet ID",
            Self::NoData(_) => "No data found",
            Self::MissingColumns(_) => "Required columns not found",
            Self::Upstream { .. } | Self::Network(_) | Self::Json(_) | Self::Io(_) => {
                "Failed to fetch data"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
