//! Application state for the Timesheet Payroll Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::OvertimeTariff;
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Contains read-only resources shared across all request handlers: the
/// loaded payroll configuration and the overtime tariff.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll configuration.
    config: Arc<ConfigLoader>,
    /// The overtime tariff applied to every report.
    tariff: Arc<OvertimeTariff>,
}

impl AppState {
    /// Creates a new application state with the standard overtime tariff.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_tariff(config, OvertimeTariff::standard())
    }

    /// Creates a new application state with a custom overtime tariff.
    pub fn with_tariff(config: ConfigLoader, tariff: OvertimeTariff) -> Self {
        Self {
            config: Arc::new(config),
            tariff: Arc::new(tariff),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a reference to the overtime tariff.
    pub fn tariff(&self) -> &OvertimeTariff {
        &self.tariff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_default_state_uses_standard_tariff() {
        let state = AppState::new(ConfigLoader::default());
        assert_eq!(state.tariff(), &OvertimeTariff::standard());
        assert_eq!(state.config().company_cost_items().len(), 5);
    }
}
