//! Application state for the AV Labor Engine API.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::config::{ConfigLoader, RateConfig, RateOverrides};
use crate::error::EngineResult;

/// Shared application state.
///
/// Holds the loaded engine configuration. Cloning is cheap; every clone
/// points at the same configuration.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the configured daily hour cap.
    pub fn max_hours_per_day(&self) -> Decimal {
        self.config.scheduling().max_hours_per_day
    }

    /// Resolves the rates for one request by layering its overrides.
    pub fn resolve_rates(&self, overrides: &[RateOverrides]) -> EngineResult<RateConfig> {
        self.config.resolve_rates(overrides)
    }
}
