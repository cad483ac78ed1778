//! Payroll report models.
//!
//! This module contains the per-employee [`EmployeeSummary`] totals, the
//! shared [`CompanyCostItem`] lines and the [`EmployeeReport`] that pairs a
//! summary with its day records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DayRecord;

/// A fixed employer-side cost line, shared by every employee of a run.
///
/// # Example
///
/// ```
/// use timesheet_payroll::models::CompanyCostItem;
///
/// let item = CompanyCostItem::new("Employer pension contribution", 1715);
/// assert_eq!(item.amount, 1715);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyCostItem {
    /// What the amount pays for.
    pub label: String,
    /// Amount in whole currency units.
    pub amount: i64,
}

impl CompanyCostItem {
    /// Creates a new cost item.
    pub fn new(label: impl Into<String>, amount: i64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Monthly totals for one employee.
///
/// Hours are exact decimals, currency amounts are integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// Employee display name.
    pub name: String,
    /// Monthly base salary.
    pub base_salary: i64,
    /// Bonus for the month.
    pub bonus: i64,
    /// Sum of the worked hours of every day record.
    pub total_worked_hours: Decimal,
    /// Sum of the overtime hours of every day record.
    pub total_overtime_hours: Decimal,
    /// Sum of the per-day flat overtime payments.
    pub total_overtime_pay: i64,
    /// `base_salary + bonus + total_overtime_pay`.
    pub gross_salary: i64,
    /// Sum of the company cost items.
    pub employer_cost_total: i64,
    /// `gross_salary + employer_cost_total`.
    pub total_employer_outlay: i64,
}

/// Day records and totals for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeReport {
    /// One record per calendar day, ascending.
    pub days: Vec<DayRecord>,
    /// Monthly totals.
    pub summary: EmployeeSummary,
}
