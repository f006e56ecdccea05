//! Header-name based column mapping.
//!
//! A [`ColumnRule`] lists alternatives; an alternative matches a header when
//! every one of its fragments occurs in it (case-insensitive). The first
//! matching header, left to right, wins.

use crate::error::{DashboardError, Result};

pub struct ColumnRule {
    pub name: &'static str,
    pub alternatives: &'static [&'static [&'static str]],
}

impl ColumnRule {
    fn matches(&self, header: &str) -> bool {
        self.alternatives
            .iter()
            .any(|fragments| fragments.iter().all(|f| header.contains(f)))
    }
}

pub struct HeaderRow {
    headers: Vec<String>,
}

impl HeaderRow {
    pub fn new(headers: &[String]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_lowercase()).collect(),
        }
    }

    pub fn locate(&self, rule: &ColumnRule) -> Option<usize> {
        self.headers.iter().position(|h| rule.matches(h))
    }
}

/// Error listing every required column that is absent.
fn missing_columns(located: &[(&'static str, Option<usize>)]) -> DashboardError {
    DashboardError::MissingColumns(
        located
            .iter()
            .filter(|(_, index)| index.is_none())
            .map(|(name, _)| *name)
            .collect(),
    )
}

const DATE: ColumnRule = ColumnRule {
    name: "date",
    alternatives: &[&["date"]],
};

const CLIENT: ColumnRule = ColumnRule {
    name: "client",
    alternatives: &[&["client"]],
};

const COUNT: ColumnRule = ColumnRule {
    name: "count",
    alternatives: &[&["count"]],
};

const SUB_REQUEST: ColumnRule = ColumnRule {
    name: "sub-request type",
    alternatives: &[&["sub-request"], &["sub request"]],
};

const RAISED: ColumnRule = ColumnRule {
    name: "timestamp raised",
    alternatives: &[&["timestamp", "raised"]],
};

const RESOLVED: ColumnRule = ColumnRule {
    name: "timestamp resolved",
    alternatives: &[&["timestamp", "resolved"]],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MisalignmentColumns {
    pub date: usize,
    pub client: usize,
    pub count: usize,
}

impl MisalignmentColumns {
    pub fn resolve(headers: &[String]) -> Result<Self> {
        let header = HeaderRow::new(headers);
        let date = header.locate(&DATE);
        let client = header.locate(&CLIENT);
        let count = header.locate(&COUNT);

        match (date, client, count) {
            (Some(date), Some(client), Some(count)) => Ok(Self {
                date,
                client,
                count,
            }),
            _ => Err(missing_columns(&[
                (DATE.name, date),
                (CLIENT.name, client),
                (COUNT.name, count),
            ])),
        }
    }
}

/// Issue sheet layout. Without a resolved column no issue counts as
/// resolved; without a client column every issue belongs to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueColumns {
    pub sub_request: usize,
    pub raised: usize,
    pub resolved: Option<usize>,
    pub client: Option<usize>,
}

impl IssueColumns {
    pub fn resolve(headers: &[String]) -> Result<Self> {
        let header = HeaderRow::new(headers);
        let sub_request = header.locate(&SUB_REQUEST);
        let raised = header.locate(&RAISED);

        match (sub_request, raised) {
            (Some(sub_request), Some(raised)) => Ok(Self {
                sub_request,
                raised,
                resolved: header.locate(&RESOLVED),
                client: header.locate(&CLIENT),
            }),
            _ => Err(missing_columns(&[
                (SUB_REQUEST.name, sub_request),
                (RAISED.name, raised),
            ])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_misalignment_columns_case_insensitive() {
        let columns =
            MisalignmentColumns::resolve(&headers(&["Client Name", "DATE", "Notes", "Misalignment Count"]))
                .unwrap();

        assert_eq!(
            columns,
            MisalignmentColumns {
                date: 1,
                client: 0,
                count: 3
            }
        );
    }

    #[test]
    fn test_misalignment_columns_first_match_wins() {
        let columns =
            MisalignmentColumns::resolve(&headers(&["Date", "Client", "Count", "Client Region"]))
                .unwrap();

        assert_eq!(columns.client, 1);
    }

    #[test]
    fn test_misalignment_columns_reports_all_missing() {
        let err = MisalignmentColumns::resolve(&headers(&["Client", "Notes"])).unwrap_err();

        match err {
            DashboardError::MissingColumns(missing) => assert_eq!(missing, vec!["date", "count"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_issue_columns_with_optional_columns() {
        let columns = IssueColumns::resolve(&headers(&[
            "Ticket",
            "Clients",
            "Sub Request Type",
            "Timestamp (Raised)",
            "Timestamp (Resolved)",
        ]))
        .unwrap();

        assert_eq!(
            columns,
            IssueColumns {
                sub_request: 2,
                raised: 3,
                resolved: Some(4),
                client: Some(1),
            }
        );
    }

    #[test]
    fn test_issue_columns_hyphenated_sub_request() {
        let columns =
            IssueColumns::resolve(&headers(&["Sub-Request", "Raised Timestamp"])).unwrap();

        assert_eq!(columns.sub_request, 0);
        assert_eq!(columns.raised, 1);
        assert_eq!(columns.resolved, None);
        assert_eq!(columns.client, None);
    }

    #[test]
    fn test_issue_columns_raised_needs_both_fragments() {
        let err = IssueColumns::resolve(&headers(&["Sub Request", "Raised By", "Timestamp"]))
            .unwrap_err();

        match err {
            DashboardError::MissingColumns(missing) => {
                assert_eq!(missing, vec!["timestamp raised"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
