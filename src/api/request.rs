//! Request types for the Timesheet Payroll Engine API.
//!
//! This module defines the JSON request structures for the `/report`
//! endpoint.

use serde::{Deserialize, Serialize};

use crate::models::{CompanyCostItem, EmployeeTimesheet, RawClockEvent};

/// Request body for the `/report` endpoint.
///
/// The month is kept as text so that a bad selector is reported as invalid
/// input rather than as a JSON shape error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Reporting month as `YYYY-MM`.
    pub month: String,
    /// Cost items replacing the configured ones for this report.
    #[serde(default)]
    pub company_cost_items: Option<Vec<CompanyCostItem>>,
    /// Employees to report on, in output order.
    pub employees: Vec<EmployeeRequest>,
}

/// One employee in a report request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Display name.
    pub name: String,
    /// Monthly base salary; the configured default when absent.
    #[serde(default)]
    pub base_salary: Option<i64>,
    /// Bonus; the configured default when absent.
    #[serde(default)]
    pub bonus: Option<i64>,
    /// Clock events in time order.
    #[serde(default)]
    pub events: Vec<ClockEventRequest>,
}

/// One raw clock event in a report request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockEventRequest {
    /// `arrive`, `leave`, `上班` or `下班`.
    pub kind: String,
    /// Local timestamp; blank or missing rows are skipped.
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl From<ClockEventRequest> for RawClockEvent {
    fn from(req: ClockEventRequest) -> Self {
        RawClockEvent {
            kind: req.kind,
            timestamp: req.timestamp,
        }
    }
}

impl From<EmployeeRequest> for EmployeeTimesheet {
    fn from(req: EmployeeRequest) -> Self {
        EmployeeTimesheet {
            name: req.name,
            base_salary: req.base_salary,
            bonus: req.bonus,
            events: req.events.into_iter().map(Into::into).collect(),
        }
    }
}
