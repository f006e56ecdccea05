use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    // Google Forms / Sheets locale default
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%b %d, %Y %H:%M:%S",
    "%b %d, %Y %I:%M:%S %p",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y"];

/// A parsed raised/resolved cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    /// Wall-clock time as written in the cell. Months are bucketed by this.
    pub local: NaiveDateTime,
    /// UTC instant for durations. Naive cells carry no offset, so theirs is
    /// the wall-clock time itself.
    instant: NaiveDateTime,
}

impl Timestamp {
    fn naive(value: NaiveDateTime) -> Self {
        Self {
            local: value,
            instant: value,
        }
    }
}

/// Parse a raised/resolved timestamp cell.
///
/// RFC 3339 values keep their own wall-clock time for bucketing and their UTC
/// instant for durations. Naive values are taken as wall-clock time in the
/// sheet's zone.
pub fn parse_timestamp(cell: &str) -> Option<Timestamp> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Timestamp {
            local: dt.naive_local(),
            instant: dt.naive_utc(),
        });
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(Timestamp::naive)
}

/// Hours elapsed from `raised` to `resolved`, or `None` when resolution
/// precedes raising.
#[allow(clippy::cast_precision_loss)]
pub fn elapsed_hours(raised: &Timestamp, resolved: &Timestamp) -> Option<f64> {
    let millis = (resolved.instant - raised.instant).num_milliseconds();
    (millis >= 0).then(|| millis as f64 / 3_600_000.0)
}
