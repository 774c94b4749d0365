//! Month-view cursor.
//!
//! Tracks which month the calendar is showing and round-trips through the
//! `month=YYYY-MM` query-string form the view layer stores in the location
//! bar, so a restored view lands on the month the user was looking at.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};

/// A year/month pair (month is 1-12) with calendar navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(MonthCursor { year, month })
    }

    /// The month containing today, on the local calendar.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        MonthCursor {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn prev(&mut self) {
        if self.month == 1 {
            self.month = 12;
            self.year -= 1;
        } else {
            self.month -= 1;
        }
    }

    pub fn next(&mut self) {
        if self.month == 12 {
            self.month = 1;
            self.year += 1;
        } else {
            self.month += 1;
        }
    }

    pub fn go_to_today(&mut self) {
        *self = MonthCursor::current();
    }

    pub fn is_current(&self) -> bool {
        *self == MonthCursor::current()
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("cursor holds a valid month")
    }

    pub fn days_in_month(&self) -> u32 {
        let next_month = {
            let mut cursor = *self;
            cursor.next();
            cursor
        };
        next_month
            .first_day()
            .signed_duration_since(self.first_day())
            .num_days() as u32
    }

    /// Parse a `YYYY-MM` value.
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.trim().split_once('-')?;
        MonthCursor::new(year.parse().ok()?, month.parse().ok()?)
    }

    /// Restore the cursor from a location query string (`?month=YYYY-MM`).
    /// Returns `None` when no usable month parameter is present.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.trim().trim_start_matches('?');
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix("month="))
            .and_then(MonthCursor::parse)
    }

    /// The query-string form handed to the history collaborator.
    pub fn query_string(&self) -> String {
        format!("month={self}")
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prev_and_next_wrap_across_years() {
        let mut cursor = MonthCursor::new(2024, 1).unwrap();
        cursor.prev();
        assert_eq!(cursor, MonthCursor::new(2023, 12).unwrap());
        cursor.next();
        assert_eq!(cursor, MonthCursor::new(2024, 1).unwrap());

        let mut cursor = MonthCursor::new(2024, 12).unwrap();
        cursor.next();
        assert_eq!(cursor, MonthCursor::new(2025, 1).unwrap());
    }

    #[test]
    fn test_rejects_invalid_month() {
        assert!(MonthCursor::new(2024, 0).is_none());
        assert!(MonthCursor::new(2024, 13).is_none());
    }

    #[test]
    fn test_query_string_roundtrip() {
        let cursor = MonthCursor::new(2024, 3).unwrap();
        assert_eq!(cursor.query_string(), "month=2024-03");
        assert_eq!(MonthCursor::from_query("?month=2024-03"), Some(cursor));
        assert_eq!(MonthCursor::from_query("?foo=1&month=2024-03"), Some(cursor));
        assert_eq!(MonthCursor::from_query("?foo=1"), None);
        assert_eq!(MonthCursor::from_query("?month=2024-99"), None);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(MonthCursor::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthCursor::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthCursor::new(2024, 12).unwrap().days_in_month(), 31);
    }
}
