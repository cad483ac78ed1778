//! Reporting month model.
//!
//! This module contains the [`ReportMonth`] selector that anchors day
//! enumeration for a payroll run.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month selected for reporting, written `YYYY-MM`.
///
/// # Example
///
/// ```
/// use timesheet_payroll::models::ReportMonth;
///
/// let month: ReportMonth = "2024-02".parse().unwrap();
/// assert_eq!(month.days_in_month(), 29);
/// assert_eq!(month.to_string(), "2024-02");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportMonth {
    first_day: NaiveDate,
    days: u32,
}

impl ReportMonth {
    /// Creates a report month from a year and a 1-based month number.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if the month is out of range.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            EngineError::invalid_input("month", format!("{}-{:02} is not a calendar month", year, month))
        })?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| {
            EngineError::invalid_input("month", format!("{}-{:02} is out of range", year, month))
        })?;

        Ok(Self {
            first_day,
            days: (next_first - first_day).num_days() as u32,
        })
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The 1-based month number.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// Number of calendar days in the month.
    pub fn days_in_month(&self) -> u32 {
        self.days
    }

    /// Whether `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Iterates over every date of the month in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first_day.iter_days().take(self.days as usize)
    }
}

impl FromStr for ReportMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || EngineError::invalid_input("month", format!("expected YYYY-MM, got '{}'", s));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ReportMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReportMonth> for String {
    fn from(month: ReportMonth) -> Self {
        month.to_string()
    }
}

impl fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
