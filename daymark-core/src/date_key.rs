//! Canonical calendar-day keys.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day, keyed by its zero-padded `YYYY-MM-DD` form.
///
/// Day keys are derived from local calendar dates, never from UTC instants,
/// so a mark made late at night stays on the day the user saw on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        DateKey(date)
    }

    /// Today on the local calendar.
    pub fn today() -> Self {
        DateKey(Local::now().date_naive())
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(DateKey)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Whether this day falls in the given month.
    pub fn in_month(&self, year: i32, month: u32) -> bool {
        self.0.year() == year && self.0.month() == month
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DATE_KEY_FORMAT).map(DateKey)
    }
}

// Serialized as the `YYYY-MM-DD` string so it can double as a JSON map key.

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_zero_padded() {
        let key = DateKey::from_ymd(2024, 3, 1).unwrap();
        assert_eq!(key.to_string(), "2024-03-01");
    }

    #[test]
    fn test_parse_roundtrip() {
        let key: DateKey = "2024-12-25".parse().unwrap();
        assert_eq!(key, DateKey::from_ymd(2024, 12, 25).unwrap());
        assert_eq!(key.to_string(), "2024-12-25");
    }

    #[test]
    fn test_rejects_unpadded_input() {
        assert!("2024-3-1".parse::<DateKey>().is_err());
        assert!("not-a-date".parse::<DateKey>().is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let key = DateKey::from_ymd(2024, 1, 5).unwrap();
        assert_eq!(
            serde_json::to_value(key).unwrap(),
            serde_json::json!("2024-01-05")
        );
    }

    #[test]
    fn test_in_month() {
        let key = DateKey::from_ymd(2024, 3, 15).unwrap();
        assert!(key.in_month(2024, 3));
        assert!(!key.in_month(2024, 4));
        assert!(!key.in_month(2023, 3));
    }
}
