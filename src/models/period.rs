//! Calendar month periods
//!
//! Budget goals are scoped to one calendar month, and the dashboard's trend
//! view groups by month. `MonthPeriod` is the shared representation.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month, e.g. March 2025
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
}

impl MonthPeriod {
    /// Create a period, validating the month number
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(PeriodParseError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Constructors guarantee the first of the month exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (inclusive)
    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Chart label in "MMM YYYY" form, e.g. "Jan 2025"
    pub fn label(&self) -> String {
        self.first_day().format("%b %Y").to_string()
    }

    /// Parse a "YYYY-MM" string
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidYear(i32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid period format: {} (expected YYYY-MM)", s),
            Self::InvalidMonth(m) => write!(f, "Invalid month: {} (must be 1-12)", m),
            Self::InvalidYear(y) => write!(f, "Invalid year: {}", y),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        let feb = MonthPeriod::new(2024, 2).unwrap();
        assert_eq!(feb.first_day(), date(2024, 2, 1));
        assert_eq!(feb.last_day(), date(2024, 2, 29));

        let dec = MonthPeriod::new(2025, 12).unwrap();
        assert_eq!(dec.last_day(), date(2025, 12, 31));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let march = MonthPeriod::new(2025, 3).unwrap();
        assert!(march.contains(date(2025, 3, 1)));
        assert!(march.contains(date(2025, 3, 31)));
        assert!(!march.contains(date(2025, 4, 1)));
        assert!(!march.contains(date(2025, 2, 28)));
    }

    #[test]
    fn test_label() {
        assert_eq!(MonthPeriod::new(2025, 1).unwrap().label(), "Jan 2025");
        assert_eq!(MonthPeriod::new(2025, 9).unwrap().label(), "Sep 2025");
    }

    #[test]
    fn test_parse() {
        let period = MonthPeriod::parse("2025-03").unwrap();
        assert_eq!((period.year(), period.month()), (2025, 3));
        assert_eq!(period.to_string(), "2025-03");

        assert_eq!(
            MonthPeriod::parse("2025-13"),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert!(MonthPeriod::parse("March").is_err());
    }
}
