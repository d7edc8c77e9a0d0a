//! Inclusive reporting window and date parsing helpers.

use crate::error::{ReportError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;

/// Format accepted for the report window on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive `[start, end]` calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting a start that falls after the end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies inside the range, both ends included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.start, self.end)
    }
}

/// Parse a `YYYY-MM-DD` report date.
pub fn parse_report_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ReportError::InvalidDate {
        value: value.to_string(),
        format: DATE_FORMAT,
    })
}

// Two-digit year layouts come first: `%Y` would read "24" as the year 24.
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];

/// Parse a call-log timestamp and strip the time of day.
///
/// Accepts ISO and US month-first layouts, with or without a time part,
/// plus RFC 3339 timestamps carrying an offset. Returns `None` when no
/// layout matches.
pub fn parse_call_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    for layout in DATETIME_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, layout) {
            return Some(dt.date());
        }
    }
    for layout in DATE_LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(value, layout) {
            return Some(date);
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = DateRange::new(date(2024, 1, 8), date(2024, 1, 14)).unwrap();
        assert!(range.contains(date(2024, 1, 8)));
        assert!(range.contains(date(2024, 1, 14)));
        assert!(!range.contains(date(2024, 1, 7)));
        assert!(!range.contains(date(2024, 1, 15)));
    }

    #[test]
    fn test_range_rejects_reversed_bounds() {
        let err = DateRange::new(date(2024, 1, 14), date(2024, 1, 8)).unwrap_err();
        assert!(matches!(err, ReportError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_range_display() {
        let range = DateRange::new(date(2024, 1, 8), date(2024, 1, 14)).unwrap();
        assert_eq!(range.to_string(), "2024-01-08_2024-01-14");
    }

    #[test]
    fn test_parse_report_date() {
        assert_eq!(parse_report_date("2024-03-01").unwrap(), date(2024, 3, 1));
        assert!(matches!(
            parse_report_date("03/01/2024"),
            Err(ReportError::InvalidDate { .. })
        ));
        assert!(parse_report_date("2024-02-30").is_err());
    }

    #[test]
    fn test_parse_call_date_layouts() {
        assert_eq!(parse_call_date("2024-01-09 16:45:10"), Some(date(2024, 1, 9)));
        assert_eq!(parse_call_date("2024-01-09T08:00:00"), Some(date(2024, 1, 9)));
        assert_eq!(parse_call_date("1/9/2024 4:45 PM"), Some(date(2024, 1, 9)));
        assert_eq!(parse_call_date("01/09/2024"), Some(date(2024, 1, 9)));
        assert_eq!(parse_call_date("2024-01-09"), Some(date(2024, 1, 9)));
        assert_eq!(parse_call_date("yesterday"), None);
    }

    #[test]
    fn test_parse_call_date_two_digit_year() {
        assert_eq!(parse_call_date("1/9/24 10:15"), Some(date(2024, 1, 9)));
        assert_eq!(parse_call_date("01/09/24 10:15:30"), Some(date(2024, 1, 9)));
        assert_eq!(parse_call_date("1/9/24 4:45 PM"), Some(date(2024, 1, 9)));
        assert_eq!(parse_call_date("1/9/24"), Some(date(2024, 1, 9)));
        assert_eq!(parse_call_date("1/9/2024 10:15"), Some(date(2024, 1, 9)));
    }

    #[test]
    fn test_parse_call_date_fractional_seconds_and_offsets() {
        assert_eq!(parse_call_date("2024-01-09 10:15:00.000"), Some(date(2024, 1, 9)));
        assert_eq!(parse_call_date("2024-01-09T10:15:00.250"), Some(date(2024, 1, 9)));
        assert_eq!(parse_call_date("2024-01-09T10:15:00Z"), Some(date(2024, 1, 9)));
        assert_eq!(parse_call_date("2024-01-09T23:15:00-05:00"), Some(date(2024, 1, 9)));
    }
}
