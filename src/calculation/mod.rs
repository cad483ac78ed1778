//! Calculation logic for the Timesheet Payroll Engine.
//!
//! This module contains the duration text codec, the flat-rate overtime
//! tariff, the session reconciler that turns clock events into day records,
//! and the aggregator that sums day records into an employee summary.
//! [`PayrollRun`] ties them together for a month.

mod aggregator;
mod duration;
mod overtime_tariff;
mod payroll_run;
mod reconciler;

pub use aggregator::{company_cost_total, summarize_employee};
pub use duration::{DurationCodec, DurationParseError, HOURS_DECIMAL_PLACES, round_hours};
pub use overtime_tariff::{OvertimeTariff, STANDARD_OVERTIME_BANDS, TariffBand};
pub use payroll_run::{EmployeeOutcome, PayrollRun};
pub use reconciler::{ReconciliationResult, reconcile_month};
