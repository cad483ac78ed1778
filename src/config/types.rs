//! Configuration types for payroll runs.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `payroll.yaml`. Every field has a default, so an
//! empty file yields the standard setup.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{CompanyCostItem, ReportLocale};

/// Hours a day must reach before it counts as a full day.
pub const DEFAULT_FULL_DAY_HOURS: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

/// Hours after which a day's time counts as overtime.
pub const DEFAULT_OVERTIME_BASE_HOURS: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

/// Monthly base salary used when an employee has none set.
pub const DEFAULT_BASE_SALARY: i64 = 30000;

/// Daily thresholds applied by the reconciler.
///
/// Both default to 9 hours; setting both to 8 gives the 8-hour variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayrollRules {
    /// Worked hours below this value produce a shortage.
    #[serde(default = "default_full_day_hours")]
    pub full_day_hours: Decimal,
    /// Worked hours above this value are overtime.
    #[serde(default = "default_overtime_base_hours")]
    pub overtime_base_hours: Decimal,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            full_day_hours: DEFAULT_FULL_DAY_HOURS,
            overtime_base_hours: DEFAULT_OVERTIME_BASE_HOURS,
        }
    }
}

fn default_full_day_hours() -> Decimal {
    DEFAULT_FULL_DAY_HOURS
}

fn default_overtime_base_hours() -> Decimal {
    DEFAULT_OVERTIME_BASE_HOURS
}

fn default_base_salary() -> i64 {
    DEFAULT_BASE_SALARY
}

/// The employer and employee insurance and pension lines shipped by default.
pub fn default_company_cost_items() -> Vec<CompanyCostItem> {
    vec![
        CompanyCostItem::new("Employee labor insurance share", 715),
        CompanyCostItem::new("Employee health insurance share", 443),
        CompanyCostItem::new("Employer health insurance", 1384),
        CompanyCostItem::new("Employer labor insurance", 2501),
        CompanyCostItem::new("Employer pension contribution", 1715),
    ]
}

/// Contents of `payroll.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayrollConfig {
    /// Daily thresholds.
    #[serde(default)]
    pub rules: PayrollRules,
    /// Base salary for employees without one.
    #[serde(default = "default_base_salary")]
    pub default_base_salary: i64,
    /// Bonus for employees without one.
    #[serde(default)]
    pub default_bonus: i64,
    /// Cost lines applied when a request does not bring its own.
    #[serde(default = "default_company_cost_items")]
    pub company_cost_items: Vec<CompanyCostItem>,
    /// Wording of duration text and notes.
    #[serde(default)]
    pub locale: ReportLocale,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            rules: PayrollRules::default(),
            default_base_salary: DEFAULT_BASE_SALARY,
            default_bonus: 0,
            company_cost_items: default_company_cost_items(),
            locale: ReportLocale::default(),
        }
    }
}
