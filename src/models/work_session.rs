//! Work session model.
//!
//! A [`WorkSession`] is one continuous attendance interval formed from an
//! adjacent arrive/leave punch pair.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::round_hours;

/// A paired arrive and leave punch.
///
/// # Example
///
/// ```
/// use timesheet_payroll::models::WorkSession;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let arrive = NaiveDateTime::parse_from_str("2025-06-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let leave = NaiveDateTime::parse_from_str("2025-06-02 20:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let session = WorkSession::new(arrive, leave).unwrap();
/// assert_eq!(session.duration_hours, Decimal::new(1150, 2));
/// assert_eq!(session.time_range(), "09:00~20:30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    /// The date of the arrive punch.
    pub date: NaiveDate,
    /// Clock-in time.
    pub arrive_time: NaiveDateTime,
    /// Clock-out time.
    pub leave_time: NaiveDateTime,
    /// `leave_time - arrive_time` in hours, rounded to 2 decimals.
    pub duration_hours: Decimal,
}

impl WorkSession {
    /// Pairs two punches into a session.
    ///
    /// Returns `None` when the leave punch precedes the arrive punch.
    pub fn new(arrive_time: NaiveDateTime, leave_time: NaiveDateTime) -> Option<Self> {
        if leave_time < arrive_time {
            return None;
        }

        let seconds = (leave_time - arrive_time).num_seconds();
        let duration_hours = round_hours(Decimal::new(seconds, 0) / Decimal::new(3600, 0));

        Some(Self {
            date: arrive_time.date(),
            arrive_time,
            leave_time,
            duration_hours,
        })
    }

    /// `HH:MM~HH:MM` text for the session.
    pub fn time_range(&self) -> String {
        format!(
            "{}~{}",
            self.arrive_time.format("%H:%M"),
            self.leave_time.format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_nine_hour_session() {
        let session = WorkSession::new(
            make_datetime("2025-06-02 09:00:00"),
            make_datetime("2025-06-02 18:00:00"),
        )
        .unwrap();

        assert_eq!(session.duration_hours, dec("9.0"));
        assert_eq!(session.date, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
    }

    #[test]
    fn test_duration_rounded_to_two_decimals() {
        // 8h 20m = 8.3333...
        let session = WorkSession::new(
            make_datetime("2025-06-02 09:00:00"),
            make_datetime("2025-06-02 17:20:00"),
        )
        .unwrap();

        assert_eq!(session.duration_hours, dec("8.33"));
    }

    #[test]
    fn test_zero_duration_session() {
        let session = WorkSession::new(
            make_datetime("2025-06-02 09:00:00"),
            make_datetime("2025-06-02 09:00:00"),
        )
        .unwrap();

        assert_eq!(session.duration_hours, Decimal::ZERO);
    }

    #[test]
    fn test_overnight_session_dated_by_arrive() {
        let session = WorkSession::new(
            make_datetime("2025-06-02 22:00:00"),
            make_datetime("2025-06-03 06:00:00"),
        )
        .unwrap();

        assert_eq!(session.duration_hours, dec("8"));
        assert_eq!(session.date, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        assert_eq!(session.time_range(), "22:00~06:00");
    }

    #[test]
    fn test_leave_before_arrive_is_rejected() {
        let session = WorkSession::new(
            make_datetime("2025-06-02 18:00:00"),
            make_datetime("2025-06-02 09:00:00"),
        );

        assert!(session.is_none());
    }
}
