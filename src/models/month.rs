//! Calendar month representation
//!
//! Every monthly resource (salary, fixed expenses, daily budget) is keyed by
//! a `YYYY-MM` month. Parsing is strict about the shape and the year range.

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest year accepted by [`Month::parse`]
pub const MIN_YEAR: i32 = 2020;
/// Highest year accepted by [`Month::parse`]
pub const MAX_YEAR: i32 = 2030;

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

const MONTH_NAMES_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month, serialized as `"YYYY-MM"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

/// Why a month string was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    /// Not of the form `YYYY-MM`
    Format(String),
    /// Month number outside 1..=12
    MonthOutOfRange(u32),
    /// Year outside the accepted range
    YearOutOfRange { year: i32, min: i32, max: i32 },
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(s) => write!(f, "Invalid month '{}', expected YYYY-MM", s),
            Self::MonthOutOfRange(m) => write!(f, "Month must be between 01 and 12, got {:02}", m),
            Self::YearOutOfRange { year, min, max } => {
                write!(f, "Year {} is outside the supported range {}-{}", year, min, max)
            }
        }
    }
}

impl std::error::Error for MonthParseError {}

impl Month {
    /// Create a month, returning `None` when `month` is not 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse a `YYYY-MM` string within the default year range
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        Self::parse_with_bounds(s, MIN_YEAR, MAX_YEAR)
    }

    /// Parse a `YYYY-MM` string, requiring `min <= year <= max`
    pub fn parse_with_bounds(s: &str, min: i32, max: i32) -> Result<Self, MonthParseError> {
        let month = Self::parse_shape(s)?;
        if month.year < min || month.year > max {
            return Err(MonthParseError::YearOutOfRange {
                year: month.year,
                min,
                max,
            });
        }
        Ok(month)
    }

    /// Check the strict `\d{4}-\d{2}` shape and month range, no year bounds
    fn parse_shape(s: &str) -> Result<Self, MonthParseError> {
        let bytes = s.as_bytes();
        let shape_ok = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !shape_ok {
            return Err(MonthParseError::Format(s.to_string()));
        }

        let year: i32 = s[..4]
            .parse()
            .map_err(|_| MonthParseError::Format(s.to_string()))?;
        let month: u32 = s[5..]
            .parse()
            .map_err(|_| MonthParseError::Format(s.to_string()))?;

        Self::new(year, month).ok_or(MonthParseError::MonthOutOfRange(month))
    }

    /// Whether `s` is a valid month in the default year range
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1..=12
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    /// Number of days in this month
    pub fn days(&self) -> u32 {
        self.last_day().day()
    }

    /// The date for `day` in this month, clamped to the last day
    pub fn day(&self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.days());
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or_else(|| self.last_day())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
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

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Human-readable name, e.g. "January 2024"
    pub fn name(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

/// Full English name for a month number (1..=12); empty when out of range
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// Short English name for a month number (1..=12); empty when out of range
pub fn short_month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES_SHORT.get(i as usize))
        .copied()
        .unwrap_or("")
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.trim())
    }
}

// Stored data only needs to be well-formed; year bounds apply to user input.
impl TryFrom<String> for Month {
    type Error = MonthParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_shape(&s)
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let m = Month::parse("2024-01").unwrap();
        assert_eq!(m.year(), 2024);
        assert_eq!(m.month(), 1);
        assert_eq!(m.to_string(), "2024-01");
    }

    #[test]
    fn test_parse_rejects_bad_shape() {
        assert!(matches!(Month::parse("2024-1"), Err(MonthParseError::Format(_))));
        assert!(matches!(Month::parse("24-01"), Err(MonthParseError::Format(_))));
        assert!(matches!(Month::parse("2024/01"), Err(MonthParseError::Format(_))));
        assert!(matches!(Month::parse(""), Err(MonthParseError::Format(_))));
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(
            Month::parse("2024-13"),
            Err(MonthParseError::MonthOutOfRange(13))
        );
        assert_eq!(Month::parse("2024-00"), Err(MonthParseError::MonthOutOfRange(0)));
        assert!(matches!(
            Month::parse("2019-12"),
            Err(MonthParseError::YearOutOfRange { year: 2019, .. })
        ));
        assert!(Month::parse("2030-12").is_ok());
        assert!(!Month::is_valid("2031-01"));
    }

    #[test]
    fn test_navigation_wraps_years() {
        let dec = Month::parse("2024-12").unwrap();
        assert_eq!(dec.next().to_string(), "2025-01");
        assert_eq!(dec.next().prev(), dec);
        assert_eq!(Month::parse("2024-01").unwrap().prev().to_string(), "2023-12");
    }

    #[test]
    fn test_days_and_clamping() {
        let feb = Month::parse("2024-02").unwrap();
        assert_eq!(feb.days(), 29);
        assert_eq!(feb.day(31), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(feb.day(0), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(feb.contains(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()));
        assert!(!feb.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }

    #[test]
    fn test_names() {
        assert_eq!(Month::parse("2024-01").unwrap().name(), "January 2024");
        assert_eq!(short_month_name(12), "Dec");
        assert_eq!(month_name(0), "");
        assert_eq!(short_month_name(13), "");
    }

    #[test]
    fn test_serde_as_string() {
        let m = Month::parse("2024-03").unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"2024-03\"");
        let back: Month = serde_json::from_str("\"2035-03\"").unwrap();
        assert_eq!(back.year(), 2035);
        assert!(serde_json::from_str::<Month>("\"2024-3\"").is_err());
    }
}
