//! Reporting month
//!
//! Every ledger is scoped to a single calendar month. Years are limited to
//! the range the form accepts (2000-2100).

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month that a sheet of entries is reported for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportingMonth {
    year: i32,
    month: u32,
}

impl ReportingMonth {
    /// Create a reporting month, checking both components
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(month.to_string()));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ValidationError::InvalidYear(year.to_string()));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year().clamp(MIN_YEAR, MAX_YEAR),
            month: today.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// English month name, e.g. "March"
    pub fn name(&self) -> &'static str {
        let index = usize::try_from(self.month.saturating_sub(1)).unwrap_or(0);
        MONTH_NAMES.get(index).copied().unwrap_or("January")
    }

    /// The following month, saturating at December of the last year
    pub fn next(&self) -> Self {
        match (self.month, self.year) {
            (12, MAX_YEAR) => *self,
            (12, year) => Self { year: year + 1, month: 1 },
            (month, year) => Self { year, month: month + 1 },
        }
    }

    /// The preceding month, saturating at January of the first year
    pub fn prev(&self) -> Self {
        match (self.month, self.year) {
            (1, MIN_YEAR) => *self,
            (1, year) => Self { year: year - 1, month: 12 },
            (month, year) => Self { year, month: month - 1 },
        }
    }
}

impl Default for ReportingMonth {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for ReportingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

impl FromStr for ReportingMonth {
    type Err = ValidationError;

    /// Parse `YYYY-MM`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| ValidationError::InvalidMonth(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| ValidationError::InvalidYear(year.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| ValidationError::InvalidMonth(month.to_string()))?;
        Self::new(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_ranges() {
        assert!(ReportingMonth::new(2025, 0).is_err());
        assert!(ReportingMonth::new(2025, 13).is_err());
        assert!(ReportingMonth::new(1999, 1).is_err());
        assert!(ReportingMonth::new(2101, 1).is_err());
        assert!(ReportingMonth::new(2100, 12).is_ok());
    }

    #[test]
    fn test_display_uses_month_name() {
        let month = ReportingMonth::new(2025, 3).unwrap();
        assert_eq!(month.to_string(), "March 2025");
    }

    #[test]
    fn test_next_and_prev_wrap_years() {
        let dec = ReportingMonth::new(2024, 12).unwrap();
        assert_eq!(dec.next(), ReportingMonth::new(2025, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
        let first = ReportingMonth::new(MIN_YEAR, 1).unwrap();
        assert_eq!(first.prev(), first);
    }

    #[test]
    fn test_from_str() {
        let month: ReportingMonth = "2025-07".parse().unwrap();
        assert_eq!(month.year(), 2025);
        assert_eq!(month.month(), 7);
        assert!("2025".parse::<ReportingMonth>().is_err());
        assert!("2025-13".parse::<ReportingMonth>().is_err());
    }
}
