//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rate and
//! scheduling configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, RateConfig, RateOverrides, SchedulingConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/av_default/
/// ├── rates.yaml        # Global rate configuration
/// └── scheduling.yaml   # Scheduling limits (optional)
/// ```
///
/// Every value is validated while loading, so a `ConfigLoader` never holds
/// a configuration that a computation could reject.
///
/// # Example
///
/// ```no_run
/// use av_labor_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/av_default").unwrap();
/// println!("Tech rate: ${}/h", loader.rates().tech_hourly_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if `rates.yaml` is missing
    /// - [`EngineError::ConfigParseError`] if a file is not valid YAML or
    ///   lacks a required key
    /// - [`EngineError::Config`] if a value is out of range
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rates_path = path.join("rates.yaml");
        let rates = Self::load_yaml::<RateConfig>(&rates_path)?;

        let scheduling_path = path.join("scheduling.yaml");
        let scheduling = if scheduling_path.exists() {
            Self::load_yaml::<SchedulingConfig>(&scheduling_path)?
        } else {
            debug!(
                path = %scheduling_path.display(),
                "No scheduling config found, using defaults"
            );
            SchedulingConfig::default()
        };

        let config = EngineConfig::new(rates, scheduling)?;
        debug!(
            path = %path.display(),
            rounding_rule = ?config.rates().rounding_rule,
            max_hours_per_day = %config.scheduling().max_hours_per_day,
            "Loaded engine configuration"
        );

        Ok(Self { config })
    }

    /// Builds a loader from an in-memory configuration, validating it.
    pub fn from_parts(rates: RateConfig, scheduling: SchedulingConfig) -> EngineResult<Self> {
        Ok(Self {
            config: EngineConfig::new(rates, scheduling)?,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the global rate configuration.
    pub fn rates(&self) -> &RateConfig {
        self.config.rates()
    }

    /// Returns the scheduling limits.
    pub fn scheduling(&self) -> &SchedulingConfig {
        self.config.scheduling()
    }

    /// Resolves the rate configuration for one assignment.
    ///
    /// `layers` are applied on top of the global rates in order, typically
    /// the event's overrides followed by the assignment's.
    pub fn resolve_rates<'a, I>(&self, layers: I) -> EngineResult<RateConfig>
    where
        I: IntoIterator<Item = &'a RateOverrides>,
    {
        self.rates().with_cascade(layers)
    }
}
