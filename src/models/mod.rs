//! Core data models for the Timesheet Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod clock_event;
mod day_record;
mod employee;
mod payroll_report;
mod report_locale;
mod report_month;
mod work_session;

pub use clock_event::{ClockEvent, ClockEventKind};
pub use day_record::{AnomalyKind, DayRecord, DayStatus};
pub use employee::{Employee, EmployeeTimesheet, RawClockEvent};
pub use payroll_report::{CompanyCostItem, EmployeeReport, EmployeeSummary};
pub use report_locale::ReportLocale;
pub use report_month::ReportMonth;
pub use work_session::WorkSession;
