pub mod sheets;

/// One spreadsheet row as returned upstream: ordered string cells.
pub type Row = Vec<String>;
