//! Timesheet Payroll Engine
//!
//! This crate turns raw clock-in/clock-out logs into a monthly payroll report:
//! per-day attendance records, tiered flat-rate overtime pay and employer cost
//! totals for each employee.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
