//! Employee model and raw timesheet input.
//!
//! This module defines the [`Employee`] pay settings, the unparsed
//! [`RawClockEvent`] rows of a punch-clock export, and the
//! [`EmployeeTimesheet`] that bundles them for one payroll run.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::ClockEvent;

/// Pay settings of one employee for the reporting month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Display name used in the report.
    pub name: String,
    /// Monthly base salary.
    pub base_salary: i64,
    /// Bonus for the month.
    #[serde(default)]
    pub bonus: i64,
}

/// One unparsed row of a punch-clock export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawClockEvent {
    /// `arrive`, `leave`, `上班` or `下班`.
    pub kind: String,
    /// Timestamp text; rows without one are ignored.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Everything submitted for one employee.
///
/// Salary and bonus are optional; the payroll run falls back to the
/// configured defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTimesheet {
    /// Display name used in the report.
    pub name: String,
    /// Monthly base salary override.
    #[serde(default)]
    pub base_salary: Option<i64>,
    /// Bonus override.
    #[serde(default)]
    pub bonus: Option<i64>,
    /// Punch rows in chronological order.
    #[serde(default)]
    pub events: Vec<RawClockEvent>,
}

impl EmployeeTimesheet {
    /// Parses the raw rows into clock events, preserving their order.
    ///
    /// Rows with a missing or blank timestamp are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] for the first row whose kind or
    /// timestamp cannot be parsed.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_payroll::models::{EmployeeTimesheet, RawClockEvent};
    ///
    /// let timesheet = EmployeeTimesheet {
    ///     name: "Alice".to_string(),
    ///     base_salary: None,
    ///     bonus: None,
    ///     events: vec![
    ///         RawClockEvent { kind: "上班".to_string(), timestamp: Some("2025-06-02 09:00".to_string()) },
    ///         RawClockEvent { kind: "下班".to_string(), timestamp: None },
    ///     ],
    /// };
    /// assert_eq!(timesheet.clock_events().unwrap().len(), 1);
    /// ```
    pub fn clock_events(&self) -> EngineResult<Vec<ClockEvent>> {
        self.events
            .iter()
            .enumerate()
            .filter_map(|(row, raw)| {
                let timestamp = raw.timestamp.as_deref().map(str::trim)?;
                if timestamp.is_empty() {
                    return None;
                }
                Some(ClockEvent::parse(&raw.kind, timestamp).map_err(|err| match err {
                    EngineError::InvalidInput { field, message } => EngineError::InvalidInput {
                        field: format!("events[{}].{}", row, field),
                        message,
                    },
                    other => other,
                }))
            })
            .collect()
    }

    /// Resolves the employee's pay settings against the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] for a blank name or a negative
    /// salary or bonus.
    pub fn resolve_employee(&self, default_base_salary: i64, default_bonus: i64) -> EngineResult<Employee> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EngineError::invalid_input("name", "employee name must not be blank"));
        }

        let base_salary = self.base_salary.unwrap_or(default_base_salary);
        if base_salary < 0 {
            return Err(EngineError::invalid_input(
                "base_salary",
                format!("must not be negative, got {}", base_salary),
            ));
        }

        let bonus = self.bonus.unwrap_or(default_bonus);
        if bonus < 0 {
            return Err(EngineError::invalid_input(
                "bonus",
                format!("must not be negative, got {}", bonus),
            ));
        }

        Ok(Employee {
            name: name.to_string(),
            base_salary,
            bonus,
        })
    }
}
