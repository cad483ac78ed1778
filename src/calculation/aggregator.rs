//! Payroll aggregation.
//!
//! This module rolls one employee's day records up into an
//! [`EmployeeSummary`]. Hour totals are read back from the duration text of
//! each record, so the totals match what the report shows line by line.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{CompanyCostItem, DayRecord, Employee, EmployeeSummary};

use super::DurationCodec;

/// Sums cost item amounts, failing instead of wrapping on overflow.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] on field `company_cost_items` when
/// the total does not fit in an `i64`.
pub fn company_cost_total(cost_items: &[CompanyCostItem]) -> EngineResult<i64> {
    cost_items
        .iter()
        .try_fold(0i64, |total, item| total.checked_add(item.amount))
        .ok_or_else(|| {
            EngineError::invalid_input("company_cost_items", "total amount is too large")
        })
}

/// Sums day records into monthly totals for one employee.
///
/// Overtime pay is the sum of each day's own tariff payment; overtime hours
/// are never pooled across days before tariffing.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when a currency total does not fit
/// in an `i64`.
///
/// # Example
///
/// ```
/// use timesheet_payroll::calculation::{summarize_employee, DurationCodec};
/// use timesheet_payroll::models::{CompanyCostItem, DayRecord, DayStatus, Employee};
///
/// let employee = Employee { name: "Alice".to_string(), base_salary: 30000, bonus: 1000 };
/// let mut worked = DayRecord::holiday(2, "");
/// worked.status = DayStatus::Worked;
/// worked.worked_hours = "11 hours 30 minutes".to_string();
/// worked.overtime_hours = "2 hours 30 minutes".to_string();
/// worked.overtime_pay = Some(423);
///
/// let records = vec![DayRecord::holiday(1, "holiday"), worked];
/// let costs = vec![CompanyCostItem::new("Employer pension contribution", 1715)];
///
/// let summary = summarize_employee(&employee, &records, &costs, &DurationCodec::default()).unwrap();
/// assert_eq!(summary.gross_salary, 31423);
/// assert_eq!(summary.total_employer_outlay, 33138);
/// ```
pub fn summarize_employee(
    employee: &Employee,
    records: &[DayRecord],
    cost_items: &[CompanyCostItem],
    codec: &DurationCodec,
) -> EngineResult<EmployeeSummary> {
    let total_worked_hours: Decimal = records
        .iter()
        .map(|record| codec.parse_lenient(&record.worked_hours))
        .sum();
    let total_overtime_hours: Decimal = records
        .iter()
        .map(|record| codec.parse_lenient(&record.overtime_hours))
        .sum();

    let overflow = |field: &str| {
        EngineError::invalid_input(field, format!("{} is too large", field))
    };

    let total_overtime_pay = records
        .iter()
        .filter_map(|record| record.overtime_pay)
        .try_fold(0i64, i64::checked_add)
        .ok_or_else(|| overflow("total_overtime_pay"))?;
    let gross_salary = employee
        .base_salary
        .checked_add(employee.bonus)
        .and_then(|pay| pay.checked_add(total_overtime_pay))
        .ok_or_else(|| overflow("gross_salary"))?;
    let employer_cost_total = company_cost_total(cost_items)?;
    let total_employer_outlay = gross_salary
        .checked_add(employer_cost_total)
        .ok_or_else(|| overflow("total_employer_outlay"))?;

    Ok(EmployeeSummary {
        name: employee.name.clone(),
        base_salary: employee.base_salary,
        bonus: employee.bonus,
        total_worked_hours: total_worked_hours.normalize(),
        total_overtime_hours: total_overtime_hours.normalize(),
        total_overtime_pay,
        gross_salary,
        employer_cost_total,
        total_employer_outlay,
    })
}
