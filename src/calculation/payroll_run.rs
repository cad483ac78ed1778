//! Monthly payroll runs.
//!
//! A [`PayrollRun`] binds a reporting month to a configuration and tariff,
//! then pushes each employee's timesheet through reconciliation and
//! aggregation. Employees are processed independently: one employee's bad
//! input never affects another's report.

use std::time::Instant;

use tracing::{info, warn};

use crate::config::PayrollConfig;
use crate::error::EngineResult;
use crate::models::{CompanyCostItem, EmployeeReport, EmployeeTimesheet, ReportMonth};

use super::{
    DurationCodec, OvertimeTariff, company_cost_total, reconcile_month, summarize_employee,
};

/// Outcome for one employee of a run.
#[derive(Debug)]
pub struct EmployeeOutcome {
    /// Name as submitted.
    pub name: String,
    /// The report, or why it could not be produced.
    pub result: EngineResult<EmployeeReport>,
}

/// One month of payroll processing.
///
/// # Example
///
/// ```
/// use timesheet_payroll::calculation::{OvertimeTariff, PayrollRun};
/// use timesheet_payroll::config::PayrollConfig;
/// use timesheet_payroll::models::{EmployeeTimesheet, RawClockEvent};
///
/// let config = PayrollConfig::default();
/// let tariff = OvertimeTariff::standard();
/// let run = PayrollRun::new("2025-06".parse().unwrap(), &config, &tariff);
///
/// let timesheet = EmployeeTimesheet {
///     name: "Alice".to_string(),
///     base_salary: None,
///     bonus: None,
///     events: vec![
///         RawClockEvent { kind: "arrive".to_string(), timestamp: Some("2025-06-02 09:00".to_string()) },
///         RawClockEvent { kind: "leave".to_string(), timestamp: Some("2025-06-02 20:30".to_string()) },
///     ],
/// };
///
/// let report = run.process_employee(&timesheet).unwrap();
/// assert_eq!(report.days.len(), 30);
/// assert_eq!(report.summary.gross_salary, 30423);
/// ```
#[derive(Debug, Clone)]
pub struct PayrollRun<'a> {
    month: ReportMonth,
    config: &'a PayrollConfig,
    tariff: &'a OvertimeTariff,
    cost_items: &'a [CompanyCostItem],
    codec: DurationCodec,
}

impl<'a> PayrollRun<'a> {
    /// Creates a run using the configuration's cost items and locale.
    pub fn new(month: ReportMonth, config: &'a PayrollConfig, tariff: &'a OvertimeTariff) -> Self {
        Self {
            month,
            config,
            tariff,
            cost_items: &config.company_cost_items,
            codec: DurationCodec::new(config.locale),
        }
    }

    /// Replaces the configured cost items for this run only.
    pub fn with_cost_items(mut self, cost_items: &'a [CompanyCostItem]) -> Self {
        self.cost_items = cost_items;
        self
    }

    /// The reporting month.
    pub fn month(&self) -> ReportMonth {
        self.month
    }

    /// Cost items applied to every employee.
    pub fn cost_items(&self) -> &[CompanyCostItem] {
        self.cost_items
    }

    /// Sum of [`PayrollRun::cost_items`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::InvalidInput`] when the total
    /// does not fit in an `i64`.
    pub fn employer_cost_total(&self) -> EngineResult<i64> {
        company_cost_total(self.cost_items)
    }

    /// Produces the day records and summary for one employee.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::InvalidInput`] when the timesheet
    /// has a blank name, a negative amount, or an unreadable event, or when
    /// a currency total overflows.
    pub fn process_employee(&self, timesheet: &EmployeeTimesheet) -> EngineResult<EmployeeReport> {
        let employee =
            timesheet.resolve_employee(self.config.default_base_salary, self.config.default_bonus)?;
        let events = timesheet.clock_events()?;

        let reconciliation = reconcile_month(
            &events,
            self.month,
            &self.config.rules,
            self.tariff,
            &self.codec,
        );
        let summary =
            summarize_employee(&employee, &reconciliation.records, self.cost_items, &self.codec)?;

        Ok(EmployeeReport {
            days: reconciliation.records,
            summary,
        })
    }

    /// Processes every timesheet, keeping request order.
    pub fn process_all(&self, timesheets: &[EmployeeTimesheet]) -> Vec<EmployeeOutcome> {
        timesheets
            .iter()
            .map(|timesheet| {
                let start_time = Instant::now();
                let result = self.process_employee(timesheet);

                match &result {
                    Ok(report) => info!(
                        employee = %report.summary.name,
                        month = %self.month,
                        anomalies = report.days.iter().filter(|d| d.is_anomalous()).count(),
                        gross_salary = report.summary.gross_salary,
                        duration_us = start_time.elapsed().as_micros(),
                        "Employee processed"
                    ),
                    Err(err) => warn!(
                        employee = %timesheet.name,
                        month = %self.month,
                        error = %err,
                        "Employee skipped"
                    ),
                }

                EmployeeOutcome {
                    name: timesheet.name.clone(),
                    result,
                }
            })
            .collect()
    }
}
