//! Configuration loading and management for the AV Labor Engine.
//!
//! This module loads rate and scheduling configuration from YAML files and
//! resolves per-event and per-assignment overrides into a flat
//! [`RateConfig`] before any computation runs.
//!
//! # Example
//!
//! ```no_run
//! use av_labor_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/av_default").unwrap();
//! println!("OT after {} hours", config.rates().ot_threshold_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_FLAT_OVERAGE_MULTIPLIER, DEFAULT_FULL_DAY_NOMINAL_HOURS,
    DEFAULT_HALF_DAY_NOMINAL_HOURS, DEFAULT_MAX_HOURS_PER_DAY, EngineConfig, FlatRates,
    MAX_MULTIPLIER, MAX_RATE, RateConfig, RateOverrides, RoundingRule, SchedulingConfig,
};
