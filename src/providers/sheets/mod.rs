mod client;
mod source;

pub use client::SheetsClient;
pub use source::{SheetSource, Workbook, ALERTS, ISSUES, MISALIGNMENT};
