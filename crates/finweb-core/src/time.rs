//! Date range selection for filtering transactions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Parse a `YYYY-MM-DD` date, ignoring any time-of-day suffix
///
/// Returns `None` for anything unparsable; callers treat that as "no date".
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Selected date window
///
/// Filtering is applied only when both endpoints are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Range with both endpoints set
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// Build from raw picker inputs; unparsable text leaves that endpoint unset
    pub fn from_inputs(start: &str, end: &str) -> Self {
        Self::new(parse_date(start), parse_date(end))
    }

    /// Whether the range filters anything at all
    pub fn is_active(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Check if a date passes the range
    ///
    /// An inactive range admits everything, including undated records. An
    /// active range excludes undated records.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => match date {
                Some(d) => start <= d && d <= end,
                None => false,
            },
            _ => true,
        }
    }

    pub fn with_start(self, start: Option<NaiveDate>) -> Self {
        Self { start, ..self }
    }

    pub fn with_end(self, end: Option<NaiveDate>) -> Self {
        Self { end, ..self }
    }

    /// Get a human-readable description of the range
    pub fn description(&self) -> String {
        match (self.start, self.end) {
            (Some(start), Some(end)) => format!("{} to {}", start, end),
            (Some(start), None) => format!("From {} (pick an end date to filter)", start),
            (None, Some(end)) => format!("Until {} (pick a start date to filter)", end),
            (None, None) => "All Time".to_string(),
        }
    }
}

/// Date range filtering trait
pub trait RangeFilter {
    /// Whether the item falls inside the range
    fn in_range(&self, range: &DateRange) -> bool;
}

impl RangeFilter for Transaction {
    fn in_range(&self, range: &DateRange) -> bool {
        range.contains(self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-15"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date(" 2024-01-15 "), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15T08:30:00Z"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("soon"), None);
    }

    #[test]
    fn test_inactive_range_contains_everything() {
        let open = DateRange::default();
        assert!(!open.is_active());
        assert!(open.contains(None));
        assert!(open.contains(Some(ymd(1999, 1, 1))));

        let half = DateRange::new(Some(ymd(2024, 1, 1)), None);
        assert!(!half.is_active());
        assert!(half.contains(Some(ymd(2020, 1, 1))));
    }

    #[test]
    fn test_active_range_is_inclusive() {
        let range = DateRange::between(ymd(2024, 1, 15), ymd(2024, 2, 15));
        assert!(range.is_active());
        assert!(range.contains(Some(ymd(2024, 1, 15))));
        assert!(range.contains(Some(ymd(2024, 2, 15))));
        assert!(!range.contains(Some(ymd(2024, 1, 14))));
        assert!(!range.contains(Some(ymd(2024, 2, 16))));
        assert!(!range.contains(None));
    }

    #[test]
    fn test_reversed_range_contains_nothing() {
        let range = DateRange::between(ymd(2024, 3, 1), ymd(2024, 1, 1));
        assert!(!range.contains(Some(ymd(2024, 2, 1))));
        assert!(!range.contains(Some(ymd(2024, 3, 1))));
    }

    #[test]
    fn test_from_inputs() {
        let range = DateRange::from_inputs("2024-01-01", "not-a-date");
        assert_eq!(range.start, Some(ymd(2024, 1, 1)));
        assert_eq!(range.end, None);
        assert!(!range.is_active());
    }

    #[test]
    fn test_description() {
        assert_eq!(DateRange::default().description(), "All Time");
        let range = DateRange::between(ymd(2024, 1, 1), ymd(2024, 12, 31));
        assert_eq!(range.description(), "2024-01-01 to 2024-12-31");
        assert!(range.with_end(None).description().starts_with("From 2024-01-01"));
    }
}
