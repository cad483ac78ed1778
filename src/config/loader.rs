//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::info;

use crate::calculation::company_cost_total;
use crate::error::{EngineError, EngineResult};
use crate::models::{CompanyCostItem, ReportLocale};

use super::types::{PayrollConfig, PayrollRules};

/// Name of the configuration file inside the configuration directory.
pub const PAYROLL_CONFIG_FILE: &str = "payroll.yaml";

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── payroll.yaml   # Thresholds, salary defaults, company cost items, locale
/// ```
///
/// # Example
///
/// ```no_run
/// use timesheet_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Full day: {} hours", loader.rules().full_day_hours);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `payroll.yaml` is missing
    /// - The file contains invalid YAML
    /// - A threshold is not positive or an amount is negative
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let config_path = path.as_ref().join(PAYROLL_CONFIG_FILE);
        let path_str = config_path.display().to_string();

        let content = fs::read_to_string(&config_path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::parse(&content, &path_str)?;
        info!(
            path = %path_str,
            full_day_hours = %config.rules.full_day_hours,
            overtime_base_hours = %config.rules.overtime_base_hours,
            cost_items = config.company_cost_items.len(),
            "Loaded payroll configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: PayrollConfig) -> EngineResult<Self> {
        validate(&config, "<in-memory>")?;
        Ok(Self { config })
    }

    fn parse(content: &str, path: &str) -> EngineResult<PayrollConfig> {
        // An empty file deserializes as YAML null; treat it as all defaults.
        let config: PayrollConfig = if content.trim().is_empty() {
            PayrollConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?
        };

        validate(&config, path)?;
        Ok(config)
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the daily thresholds.
    pub fn rules(&self) -> &PayrollRules {
        &self.config.rules
    }

    /// Returns the configured company cost items.
    pub fn company_cost_items(&self) -> &[CompanyCostItem] {
        &self.config.company_cost_items
    }

    /// Returns the report locale.
    pub fn locale(&self) -> ReportLocale {
        self.config.locale
    }
}

fn validate(config: &PayrollConfig, path: &str) -> EngineResult<()> {
    let invalid = |message: String| EngineError::ConfigParseError {
        path: path.to_string(),
        message,
    };

    if config.rules.full_day_hours <= Decimal::ZERO {
        return Err(invalid(format!(
            "rules.full_day_hours must be positive, got {}",
            config.rules.full_day_hours
        )));
    }
    if config.rules.overtime_base_hours <= Decimal::ZERO {
        return Err(invalid(format!(
            "rules.overtime_base_hours must be positive, got {}",
            config.rules.overtime_base_hours
        )));
    }
    if config.default_base_salary < 0 || config.default_bonus < 0 {
        return Err(invalid(
            "default_base_salary and default_bonus must not be negative".to_string(),
        ));
    }
    if let Some(item) = config.company_cost_items.iter().find(|item| item.amount < 0) {
        return Err(invalid(format!(
            "company cost item '{}' has negative amount {}",
            item.label, item.amount
        )));
    }
    company_cost_total(&config.company_cost_items)
        .map_err(|err| invalid(format!("company_cost_items: {}", err)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.rules().full_day_hours, dec("9"));
        assert_eq!(loader.rules().overtime_base_hours, dec("9"));
        assert_eq!(loader.config().default_base_salary, 30000);
        assert_eq!(loader.locale(), ReportLocale::English);
    }

    #[test]
    fn test_shipped_cost_items() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let amounts: Vec<i64> = loader.company_cost_items().iter().map(|i| i.amount).collect();
        assert_eq!(amounts, vec![715, 443, 1384, 2501, 1715]);
        assert_eq!(company_cost_total(loader.company_cost_items()).unwrap(), 6758);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("payroll.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = ConfigLoader::parse("", "payroll.yaml").unwrap();
        assert_eq!(config, PayrollConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let yaml = "rules:\n  full_day_hours: 8\n  overtime_base_hours: 8\nlocale: traditional_chinese\n";
        let config = ConfigLoader::parse(yaml, "payroll.yaml").unwrap();

        assert_eq!(config.rules.full_day_hours, dec("8"));
        assert_eq!(config.rules.overtime_base_hours, dec("8"));
        assert_eq!(config.locale, ReportLocale::TraditionalChinese);
        assert_eq!(config.default_base_salary, 30000);
        assert_eq!(config.company_cost_items.len(), 5);
    }

    #[test]
    fn test_fractional_threshold() {
        let config = ConfigLoader::parse("rules:\n  full_day_hours: 7.5\n", "payroll.yaml").unwrap();
        assert_eq!(config.rules.full_day_hours, dec("7.5"));
        assert_eq!(config.rules.overtime_base_hours, dec("9"));
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        match ConfigLoader::parse("rules: [not, a, map", "payroll.yaml") {
            Err(EngineError::ConfigParseError { path, .. }) => assert_eq!(path, "payroll.yaml"),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_non_positive_threshold_rejected() {
        let result = ConfigLoader::parse("rules:\n  full_day_hours: 0\n", "payroll.yaml");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_negative_cost_item_rejected() {
        let yaml = "company_cost_items:\n  - label: Refund\n    amount: -5\n";
        match ConfigLoader::parse(yaml, "payroll.yaml") {
            Err(EngineError::ConfigParseError { message, .. }) => assert!(message.contains("Refund")),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_cost_total_rejected() {
        let yaml = format!(
            "company_cost_items:\n  - label: A\n    amount: {}\n  - label: B\n    amount: 1\n",
            i64::MAX
        );
        assert!(matches!(
            ConfigLoader::parse(&yaml, "payroll.yaml"),
            Err(EngineError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_from_config_validates() {
        let mut config = PayrollConfig::default();
        config.default_bonus = -10;
        assert!(ConfigLoader::from_config(config).is_err());
        assert!(ConfigLoader::from_config(PayrollConfig::default()).is_ok());
    }
}
