//! Configuration types for rate calculation and scheduling.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, together with the
//! validation that guards every computation against a bad configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::RateType;

/// Default nominal hours covered by a half-day rate.
pub const DEFAULT_HALF_DAY_NOMINAL_HOURS: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Default nominal hours covered by a full-day rate.
pub const DEFAULT_FULL_DAY_NOMINAL_HOURS: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Default multiplier applied to a flat rate when the assignment runs long.
pub const DEFAULT_FLAT_OVERAGE_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Default cap on the hours one technician may work in a day.
pub const DEFAULT_MAX_HOURS_PER_DAY: Decimal = Decimal::from_parts(16, 0, 0, false, 0);

/// Largest hourly or flat rate a configuration may carry.
pub const MAX_RATE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Largest multiplier a configuration may carry.
pub const MAX_MULTIPLIER: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Rounding applied to the total hours of a shift before bucketing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingRule {
    /// No rounding.
    #[default]
    Exact,
    /// Nearest 0.25 hour.
    #[serde(alias = "quarter")]
    QuarterHour,
    /// Nearest 0.5 hour.
    #[serde(alias = "half")]
    HalfHour,
    /// Nearest whole hour.
    #[serde(alias = "full")]
    FullHour,
}

impl RoundingRule {
    /// Returns how many rounding increments make up one hour, or `None` for
    /// [`RoundingRule::Exact`].
    pub fn increments_per_hour(self) -> Option<u32> {
        match self {
            RoundingRule::Exact => None,
            RoundingRule::QuarterHour => Some(4),
            RoundingRule::HalfHour => Some(2),
            RoundingRule::FullHour => Some(1),
        }
    }
}

/// The flat rate configuration for one rate configuration, by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRates {
    /// Flat amount paid to the technician, if configured.
    pub tech: Option<Decimal>,
    /// Flat amount billed to the customer, if configured.
    pub bill: Option<Decimal>,
}

/// A fully resolved rate configuration.
///
/// Any cascade of global, per-event and per-assignment settings has already
/// been applied (see [`RateConfig::with_overrides`]). Values are checked by
/// [`RateConfig::validate`] when the configuration is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfig {
    /// Hours of non-DT work before overtime applies.
    pub ot_threshold_hours: Decimal,
    /// Clock hour (0-23) the double-time window opens.
    pub dt_window_start_hour: u32,
    /// Clock hour (0-23) the double-time window closes. Equal to the start
    /// hour when double time is disabled.
    pub dt_window_end_hour: u32,
    /// Technician overtime multiplier.
    pub ot_multiplier: Decimal,
    /// Technician double-time multiplier.
    pub dt_multiplier: Decimal,
    /// Billing overtime multiplier; falls back to `ot_multiplier`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_ot_multiplier: Option<Decimal>,
    /// Billing double-time multiplier; falls back to `dt_multiplier`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_dt_multiplier: Option<Decimal>,
    /// Rounding applied to total hours.
    #[serde(default)]
    pub rounding_rule: RoundingRule,
    /// Base hourly rate paid to the technician.
    pub tech_hourly_rate: Decimal,
    /// Base hourly rate billed to the customer.
    pub bill_hourly_rate: Decimal,
    /// Flat half-day technician rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_half_day_rate: Option<Decimal>,
    /// Flat full-day technician rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_full_day_rate: Option<Decimal>,
    /// Flat half-day billing rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_half_day_rate: Option<Decimal>,
    /// Flat full-day billing rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_full_day_rate: Option<Decimal>,
    /// Hours covered by a half-day rate before overage applies.
    #[serde(default = "default_half_day_nominal_hours")]
    pub half_day_nominal_hours: Decimal,
    /// Hours covered by a full-day rate before overage applies.
    #[serde(default = "default_full_day_nominal_hours")]
    pub full_day_nominal_hours: Decimal,
    /// Multiplier applied to a flat rate when its nominal hours are exceeded.
    #[serde(default = "default_flat_overage_multiplier")]
    pub flat_overage_multiplier: Decimal,
}

fn default_half_day_nominal_hours() -> Decimal {
    DEFAULT_HALF_DAY_NOMINAL_HOURS
}

fn default_full_day_nominal_hours() -> Decimal {
    DEFAULT_FULL_DAY_NOMINAL_HOURS
}

fn default_flat_overage_multiplier() -> Decimal {
    DEFAULT_FLAT_OVERAGE_MULTIPLIER
}

impl RateConfig {
    /// Checks every value, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] naming the key when:
    /// - `ot_threshold_hours` or a nominal-hours value is not positive
    /// - a DT window hour is outside 0-23
    /// - any multiplier is outside 1.0 to [`MAX_MULTIPLIER`]
    /// - any rate is negative or above [`MAX_RATE`]
    ///
    /// # Example
    ///
    /// ```
    /// use av_labor_engine::config::RateConfig;
    /// use rust_decimal::Decimal;
    ///
    /// let mut config = RateConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.ot_multiplier = Decimal::new(9, 1);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        ensure_positive("ot_threshold_hours", self.ot_threshold_hours)?;
        ensure_clock_hour("dt_window_start_hour", self.dt_window_start_hour)?;
        ensure_clock_hour("dt_window_end_hour", self.dt_window_end_hour)?;

        ensure_multiplier("ot_multiplier", self.ot_multiplier)?;
        ensure_multiplier("dt_multiplier", self.dt_multiplier)?;
        if let Some(m) = self.bill_ot_multiplier {
            ensure_multiplier("bill_ot_multiplier", m)?;
        }
        if let Some(m) = self.bill_dt_multiplier {
            ensure_multiplier("bill_dt_multiplier", m)?;
        }
        ensure_multiplier("flat_overage_multiplier", self.flat_overage_multiplier)?;

        ensure_rate("tech_hourly_rate", self.tech_hourly_rate)?;
        ensure_rate("bill_hourly_rate", self.bill_hourly_rate)?;
        for (field, rate) in [
            ("tech_half_day_rate", self.tech_half_day_rate),
            ("tech_full_day_rate", self.tech_full_day_rate),
            ("bill_half_day_rate", self.bill_half_day_rate),
            ("bill_full_day_rate", self.bill_full_day_rate),
        ] {
            if let Some(rate) = rate {
                ensure_rate(field, rate)?;
            }
        }

        ensure_positive("half_day_nominal_hours", self.half_day_nominal_hours)?;
        ensure_positive("full_day_nominal_hours", self.full_day_nominal_hours)?;
        Ok(())
    }

    /// Returns true unless the DT window opens and closes at the same hour.
    pub fn has_dt_window(&self) -> bool {
        self.dt_window_start_hour != self.dt_window_end_hour
    }

    /// Returns the overtime multiplier used for billing.
    pub fn effective_bill_ot_multiplier(&self) -> Decimal {
        self.bill_ot_multiplier.unwrap_or(self.ot_multiplier)
    }

    /// Returns the double-time multiplier used for billing.
    pub fn effective_bill_dt_multiplier(&self) -> Decimal {
        self.bill_dt_multiplier.unwrap_or(self.dt_multiplier)
    }

    /// Returns the configured flat rates for a rate type.
    ///
    /// Hourly assignments have no flat rates.
    pub fn flat_rates(&self, rate_type: RateType) -> FlatRates {
        match rate_type {
            RateType::Hourly => FlatRates {
                tech: None,
                bill: None,
            },
            RateType::HalfDay => FlatRates {
                tech: self.tech_half_day_rate,
                bill: self.bill_half_day_rate,
            },
            RateType::FullDay => FlatRates {
                tech: self.tech_full_day_rate,
                bill: self.bill_full_day_rate,
            },
        }
    }

    /// Returns the hours a flat rate covers, or `None` for hourly.
    pub fn nominal_hours(&self, rate_type: RateType) -> Option<Decimal> {
        match rate_type {
            RateType::Hourly => None,
            RateType::HalfDay => Some(self.half_day_nominal_hours),
            RateType::FullDay => Some(self.full_day_nominal_hours),
        }
    }

    /// Returns a copy with `overrides` applied and re-validated.
    ///
    /// Only the fields set in `overrides` change. Apply the layers of a
    /// cascade in order (global, then event, then assignment) to resolve the
    /// configuration for one assignment.
    ///
    /// # Example
    ///
    /// ```
    /// use av_labor_engine::config::{RateConfig, RateOverrides};
    /// use rust_decimal::Decimal;
    ///
    /// let global = RateConfig::default();
    /// let event = RateOverrides {
    ///     bill_hourly_rate: Some(Decimal::from(95)),
    ///     ..Default::default()
    /// };
    ///
    /// let resolved = global.with_overrides(&event).unwrap();
    /// assert_eq!(resolved.bill_hourly_rate, Decimal::from(95));
    /// assert_eq!(resolved.tech_hourly_rate, global.tech_hourly_rate);
    /// ```
    pub fn with_overrides(&self, overrides: &RateOverrides) -> EngineResult<RateConfig> {
        let mut resolved = self.clone();

        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = overrides.$field {
                        resolved.$field = value;
                    }
                )*
            };
        }
        macro_rules! apply_optional {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = overrides.$field {
                        resolved.$field = Some(value);
                    }
                )*
            };
        }

        apply!(
            ot_threshold_hours,
            dt_window_start_hour,
            dt_window_end_hour,
            ot_multiplier,
            dt_multiplier,
            rounding_rule,
            tech_hourly_rate,
            bill_hourly_rate,
            half_day_nominal_hours,
            full_day_nominal_hours,
            flat_overage_multiplier,
        );
        apply_optional!(
            bill_ot_multiplier,
            bill_dt_multiplier,
            tech_half_day_rate,
            tech_full_day_rate,
            bill_half_day_rate,
            bill_full_day_rate,
        );

        resolved.validate()?;
        Ok(resolved)
    }

    /// Applies several override layers in order.
    pub fn with_cascade<'a, I>(&self, layers: I) -> EngineResult<RateConfig>
    where
        I: IntoIterator<Item = &'a RateOverrides>,
    {
        layers
            .into_iter()
            .try_fold(self.clone(), |config, layer| config.with_overrides(layer))
    }
}

impl Default for RateConfig {
    /// Typical AV labor settings: 10 hour OT threshold, DT from 20:00 to
    /// 04:00, 1.5x / 2x multipliers, exact hours.
    fn default() -> Self {
        Self {
            ot_threshold_hours: Decimal::from(10),
            dt_window_start_hour: 20,
            dt_window_end_hour: 4,
            ot_multiplier: Decimal::new(15, 1),
            dt_multiplier: Decimal::from(2),
            bill_ot_multiplier: None,
            bill_dt_multiplier: None,
            rounding_rule: RoundingRule::Exact,
            tech_hourly_rate: Decimal::from(50),
            bill_hourly_rate: Decimal::from(85),
            tech_half_day_rate: None,
            tech_full_day_rate: None,
            bill_half_day_rate: None,
            bill_full_day_rate: None,
            half_day_nominal_hours: DEFAULT_HALF_DAY_NOMINAL_HOURS,
            full_day_nominal_hours: DEFAULT_FULL_DAY_NOMINAL_HOURS,
            flat_overage_multiplier: DEFAULT_FLAT_OVERAGE_MULTIPLIER,
        }
    }
}

/// A partial rate configuration layered on top of a [`RateConfig`].
///
/// Every field is optional; unset fields leave the underlying value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateOverrides {
    /// Overrides [`RateConfig::ot_threshold_hours`].
    pub ot_threshold_hours: Option<Decimal>,
    /// Overrides [`RateConfig::dt_window_start_hour`].
    pub dt_window_start_hour: Option<u32>,
    /// Overrides [`RateConfig::dt_window_end_hour`].
    pub dt_window_end_hour: Option<u32>,
    /// Overrides [`RateConfig::ot_multiplier`].
    pub ot_multiplier: Option<Decimal>,
    /// Overrides [`RateConfig::dt_multiplier`].
    pub dt_multiplier: Option<Decimal>,
    /// Overrides [`RateConfig::bill_ot_multiplier`].
    pub bill_ot_multiplier: Option<Decimal>,
    /// Overrides [`RateConfig::bill_dt_multiplier`].
    pub bill_dt_multiplier: Option<Decimal>,
    /// Overrides [`RateConfig::rounding_rule`].
    pub rounding_rule: Option<RoundingRule>,
    /// Overrides [`RateConfig::tech_hourly_rate`].
    pub tech_hourly_rate: Option<Decimal>,
    /// Overrides [`RateConfig::bill_hourly_rate`].
    pub bill_hourly_rate: Option<Decimal>,
    /// Overrides [`RateConfig::tech_half_day_rate`].
    pub tech_half_day_rate: Option<Decimal>,
    /// Overrides [`RateConfig::tech_full_day_rate`].
    pub tech_full_day_rate: Option<Decimal>,
    /// Overrides [`RateConfig::bill_half_day_rate`].
    pub bill_half_day_rate: Option<Decimal>,
    /// Overrides [`RateConfig::bill_full_day_rate`].
    pub bill_full_day_rate: Option<Decimal>,
    /// Overrides [`RateConfig::half_day_nominal_hours`].
    pub half_day_nominal_hours: Option<Decimal>,
    /// Overrides [`RateConfig::full_day_nominal_hours`].
    pub full_day_nominal_hours: Option<Decimal>,
    /// Overrides [`RateConfig::flat_overage_multiplier`].
    pub flat_overage_multiplier: Option<Decimal>,
}

impl RateOverrides {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Scheduling limits from scheduling.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Hours one technician may work in a day before a warning is raised.
    #[serde(default = "default_max_hours_per_day")]
    pub max_hours_per_day: Decimal,
}

fn default_max_hours_per_day() -> Decimal {
    DEFAULT_MAX_HOURS_PER_DAY
}

impl SchedulingConfig {
    /// Checks the scheduling limits.
    pub fn validate(&self) -> EngineResult<()> {
        ensure_positive("max_hours_per_day", self.max_hours_per_day)
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            max_hours_per_day: DEFAULT_MAX_HOURS_PER_DAY,
        }
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    rates: RateConfig,
    scheduling: SchedulingConfig,
}

impl EngineConfig {
    /// Creates a configuration from its parts, validating both.
    pub fn new(rates: RateConfig, scheduling: SchedulingConfig) -> EngineResult<Self> {
        rates.validate()?;
        scheduling.validate()?;
        Ok(Self { rates, scheduling })
    }

    /// Returns the global rate configuration.
    pub fn rates(&self) -> &RateConfig {
        &self.rates
    }

    /// Returns the scheduling limits.
    pub fn scheduling(&self) -> &SchedulingConfig {
        &self.scheduling
    }
}

fn ensure_positive(field: &str, value: Decimal) -> EngineResult<()> {
    if value <= Decimal::ZERO {
        return Err(EngineError::config(
            field,
            format!("must be greater than 0, got {}", value),
        ));
    }
    Ok(())
}

fn ensure_rate(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::config(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    if value > MAX_RATE {
        return Err(EngineError::config(
            field,
            format!("must not exceed {}, got {}", MAX_RATE, value),
        ));
    }
    Ok(())
}

fn ensure_multiplier(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ONE || value > MAX_MULTIPLIER {
        return Err(EngineError::config(
            field,
            format!("must be between 1.0 and {}, got {}", MAX_MULTIPLIER, value),
        ));
    }
    Ok(())
}

fn ensure_clock_hour(field: &str, value: u32) -> EngineResult<()> {
    if value > 23 {
        return Err(EngineError::config(
            field,
            format!("must be an hour between 0 and 23, got {}", value),
        ));
    }
    Ok(())
}
