//! Configuration loading and management for the Timesheet Payroll Engine.
//!
//! This module loads the payroll thresholds, salary defaults, company cost
//! items and report locale from `payroll.yaml`.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Overtime after {} hours", config.rules().overtime_base_hours);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, PAYROLL_CONFIG_FILE};
pub use types::{
    DEFAULT_BASE_SALARY, DEFAULT_FULL_DAY_HOURS, DEFAULT_OVERTIME_BASE_HOURS, PayrollConfig,
    PayrollRules, default_company_cost_items,
};
