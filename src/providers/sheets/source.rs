use std::fmt;

/// Spreadsheet a source lives in; each one is configured with its own ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workbook {
    Tracking,
    Issues,
}

impl fmt::Display for Workbook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tracking => write!(f, "tracking"),
            Self::Issues => write!(f, "issues"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSource {
    pub label: &'static str,
    pub workbook: Workbook,
    /// A1 notation, e.g. `Alert_Tracking!A:F`.
    pub range: &'static str,
}

pub const ALERTS: SheetSource = SheetSource {
    label: "alerts",
    workbook: Workbook::Tracking,
    range: "Alert_Tracking!A:F",
};

pub const MISALIGNMENT: SheetSource = SheetSource {
    label: "misalignment data",
    workbook: Workbook::Tracking,
    range: "Misalignment_Tracking!A:F",
};

pub const ISSUES: SheetSource = SheetSource {
    label: "issues data",
    workbook: Workbook::Issues,
    range: "Issues-Realtime!A:Z",
};
