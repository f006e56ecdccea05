use crate::auth::ApiKey;
use crate::error::{DashboardError, Result};
use crate::providers::sheets::Workbook;

pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_ISSUE_CATEGORY: &str = "Historical Video Request";

/// Runtime settings shared by every request.
///
/// Credentials stay optional here: their absence only fails the request that
/// needs them, not process start.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub api_key: Option<ApiKey>,
    pub tracking_sheet_id: Option<String>,
    pub issues_sheet_id: Option<String>,
    pub issue_category: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            tracking_sheet_id: None,
            issues_sheet_id: None,
            issue_category: DEFAULT_ISSUE_CATEGORY.to_string(),
        }
    }
}

impl Settings {
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        tracking_sheet_id: Option<&str>,
        issues_sheet_id: Option<&str>,
        issue_category: &str,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: non_empty(api_key).map(ApiKey::from),
            tracking_sheet_id: non_empty(tracking_sheet_id).map(str::to_string),
            issues_sheet_id: non_empty(issues_sheet_id).map(str::to_string),
            issue_category: issue_category.to_string(),
        }
    }

    /// API key and spreadsheet id for `workbook`, or a configuration error.
    pub fn credentials(&self, workbook: Workbook) -> Result<(&ApiKey, &str)> {
        let sheet_id = match workbook {
            Workbook::Tracking => self.tracking_sheet_id.as_deref(),
            Workbook::Issues => self.issues_sheet_id.as_deref(),
        };

        match (&self.api_key, sheet_id) {
            (Some(key), Some(id)) => Ok((key, id)),
            (None, _) => Err(DashboardError::Config(
                "Missing API key or Sheet ID: API key is not set".to_string(),
            )),
            (_, None) => Err(DashboardError::Config(format!(
                "Missing API key or Sheet ID: {workbook} sheet ID is not set"
            ))),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_for_each_workbook() {
        let settings = Settings::new(
            DEFAULT_BASE_URL,
            Some("key"),
            Some("tracking-id"),
            Some("issues-id"),
            DEFAULT_ISSUE_CATEGORY,
        );

        let (key, id) = settings.credentials(Workbook::Tracking).unwrap();
        assert_eq!(key.as_str(), "key");
        assert_eq!(id, "tracking-id");

        let (_, id) = settings.credentials(Workbook::Issues).unwrap();
        assert_eq!(id, "issues-id");
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let settings = Settings::new(
            DEFAULT_BASE_URL,
            None,
            Some("tracking-id"),
            None,
            DEFAULT_ISSUE_CATEGORY,
        );

        let err = settings.credentials(Workbook::Tracking).unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }

    #[test]
    fn test_missing_sheet_only_fails_its_workbook() {
        let settings = Settings::new(
            DEFAULT_BASE_URL,
            Some("key"),
            Some("tracking-id"),
            None,
            DEFAULT_ISSUE_CATEGORY,
        );

        assert!(settings.credentials(Workbook::Tracking).is_ok());
        let err = settings.credentials(Workbook::Issues).unwrap_err();
        assert!(err.to_string().contains("issues sheet ID"));
    }

    #[test]
    fn test_blank_values_count_as_absent() {
        let settings = Settings::new(
            DEFAULT_BASE_URL,
            Some("   "),
            Some(""),
            Some("issues-id"),
            DEFAULT_ISSUE_CATEGORY,
        );

        assert!(settings.api_key.is_none());
        assert!(settings.tracking_sheet_id.is_none());
        assert_eq!(settings.issues_sheet_id.as_deref(), Some("issues-id"));
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.issue_category, DEFAULT_ISSUE_CATEGORY);
        assert!(settings.credentials(Workbook::Issues).is_err());
    }
}
