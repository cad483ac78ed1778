//! Day record model.
//!
//! A [`DayRecord`] is one calendar day's attendance outcome for one employee.
//! Text columns hold display-ready values; empty strings mean "nothing to
//! show" exactly as they would in the exported report.

use serde::{Deserialize, Serialize};

/// Classification of a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// A valid work session starts on this day, or an earlier overnight
    /// session ends on it.
    Worked,
    /// No punches at all.
    Holiday,
    /// Punches exist but none formed a valid session.
    Anomaly,
}

/// Why a day was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// A punch without an adjacent partner.
    UnpairedEvent,
    /// A leave punch earlier than its paired arrive punch.
    NegativeDuration,
}

/// One calendar day in the reporting month.
///
/// # Example
///
/// ```
/// use timesheet_payroll::models::{DayRecord, DayStatus};
///
/// let record = DayRecord::holiday(7, "holiday");
/// assert_eq!(record.status, DayStatus::Holiday);
/// assert_eq!(record.time_range, "holiday");
/// assert!(record.overtime_pay.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// 1-based day of the month.
    pub day_of_month: u32,
    /// Worked, holiday or anomaly.
    pub status: DayStatus,
    /// `09:00~18:00` for worked days, the holiday label, or the raw punch
    /// times of an anomalous day.
    pub time_range: String,
    /// Worked duration text, empty unless a session exists.
    pub worked_hours: String,
    /// Overtime duration text, empty when there is no overtime.
    pub overtime_hours: String,
    /// Flat-rate overtime payment, set only when there is overtime.
    pub overtime_pay: Option<i64>,
    /// Hours short of the full day, empty when the day is complete.
    pub shortage: String,
    /// Set when a punch on this day could not be used.
    pub anomaly: Option<AnomalyKind>,
    /// Human-readable warning or reminder.
    pub anomaly_note: String,
}

impl DayRecord {
    /// A day without any punches.
    pub fn holiday(day_of_month: u32, label: &str) -> Self {
        Self {
            day_of_month,
            status: DayStatus::Holiday,
            time_range: label.to_string(),
            worked_hours: String::new(),
            overtime_hours: String::new(),
            overtime_pay: None,
            shortage: String::new(),
            anomaly: None,
            anomaly_note: String::new(),
        }
    }

    /// Whether the day carries any anomaly, including worked days with a
    /// stray punch.
    pub fn is_anomalous(&self) -> bool {
        self.anomaly.is_some()
    }
}
