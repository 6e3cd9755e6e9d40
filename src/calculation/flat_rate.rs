//! Flat half-day and full-day rate calculation.
//!
//! A flat-rate assignment bypasses hour bucketing entirely. When the
//! assignment runs past the nominal hours of its day type, the flat rate is
//! scaled by the overage multiplier rather than recomputed hourly.

use rust_decimal::Decimal;

use crate::config::RateConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{FlatRateAmounts, RateType, TimeWindow};

use super::hours_breakdown::ensure_non_zero_length;
use super::rounding::{round_hours, round_money, round_output_hours};

/// Computes the flat technician and billing amounts for an assignment.
///
/// # Errors
///
/// - [`EngineError::Validation`] on `rate_type` for hourly assignments
/// - [`EngineError::Validation`] on `end_time` for a zero-length window
/// - [`EngineError::Config`] if the flat rate for either side is not
///   configured for this day type
///
/// # Example
///
/// ```
/// use av_labor_engine::calculation::compute_flat_rate;
/// use av_labor_engine::config::RateConfig;
/// use av_labor_engine::models::{RateType, TimeWindow};
/// use rust_decimal::Decimal;
///
/// let config = RateConfig {
///     tech_half_day_rate: Some(Decimal::from(200)),
///     bill_half_day_rate: Some(Decimal::from(320)),
///     ..RateConfig::default()
/// };
///
/// // 6 hours on a 4 hour half day: overage multiplier applies
/// let window = TimeWindow::parse("2025-06-01", "08:00", "14:00").unwrap();
/// let amounts = compute_flat_rate(&window, RateType::HalfDay, &config).unwrap();
/// assert!(amounts.overage_applied);
/// assert_eq!(amounts.tech_amount, Decimal::from(300));
/// assert_eq!(amounts.bill_amount, Decimal::from(480));
/// ```
pub fn compute_flat_rate(
    window: &TimeWindow,
    rate_type: RateType,
    config: &RateConfig,
) -> EngineResult<FlatRateAmounts> {
    let nominal_hours = config.nominal_hours(rate_type).ok_or_else(|| {
        EngineError::validation(
            "rate_type",
            "flat rates apply only to half-day and full-day assignments",
        )
    })?;
    ensure_non_zero_length(window)?;

    let rates = config.flat_rates(rate_type);
    let tech_rate = rates
        .tech
        .ok_or_else(|| missing_flat_rate("tech", rate_type))?;
    let bill_rate = rates
        .bill
        .ok_or_else(|| missing_flat_rate("bill", rate_type))?;

    let total_hours = round_hours(window.duration_hours(), config.rounding_rule);
    let overage_applied = total_hours > nominal_hours;
    let multiplier = if overage_applied {
        config.flat_overage_multiplier
    } else {
        Decimal::ONE
    };

    Ok(FlatRateAmounts {
        rate_type,
        total_hours: round_output_hours(total_hours),
        nominal_hours,
        overage_applied,
        tech_amount: round_money(tech_rate * multiplier),
        bill_amount: round_money(bill_rate * multiplier),
    })
}

fn missing_flat_rate(side: &str, rate_type: RateType) -> EngineError {
    let field = match rate_type {
        RateType::FullDay => format!("{}_full_day_rate", side),
        _ => format!("{}_half_day_rate", side),
    };
    EngineError::config(field, format!("no {} rate configured", rate_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundingRule;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn window(start: &str, end: &str) -> TimeWindow {
        TimeWindow::parse("2025-06-01", start, end).unwrap()
    }

    fn flat_config() -> RateConfig {
        RateConfig {
            tech_half_day_rate: Some(dec("200")),
            tech_full_day_rate: Some(dec("400")),
            bill_half_day_rate: Some(dec("325")),
            bill_full_day_rate: Some(dec("650")),
            ..RateConfig::default()
        }
    }

    // FR-001: half day within nominal hours
    #[test]
    fn test_fr_001_half_day_within_nominal() {
        let amounts = compute_flat_rate(&window("08:00", "12:00"), RateType::HalfDay, &flat_config())
            .unwrap();
        assert!(!amounts.overage_applied);
        assert_eq!(amounts.total_hours, dec("4"));
        assert_eq!(amounts.nominal_hours, dec("4"));
        assert_eq!(amounts.tech_amount, dec("200"));
        assert_eq!(amounts.bill_amount, dec("325"));
    }

    // FR-002: half day of 6 hours applies the 1.5x overage
    #[test]
    fn test_fr_002_half_day_overage() {
        let amounts = compute_flat_rate(&window("08:00", "14:00"), RateType::HalfDay, &flat_config())
            .unwrap();
        assert!(amounts.overage_applied);
        assert_eq!(amounts.total_hours, dec("6"));
        assert_eq!(amounts.tech_amount, dec("300"));
        assert_eq!(amounts.bill_amount, dec("487.5"));
    }

    // FR-003: full day at nominal hours, overnight
    #[test]
    fn test_fr_003_full_day_overnight_at_nominal() {
        let amounts = compute_flat_rate(&window("18:00", "04:00"), RateType::FullDay, &flat_config())
            .unwrap();
        assert!(!amounts.overage_applied);
        assert_eq!(amounts.total_hours, dec("10"));
        assert_eq!(amounts.tech_amount, dec("400"));
        assert_eq!(amounts.bill_amount, dec("650"));
    }

    // FR-004: rounding decides whether the nominal hours are exceeded
    #[test]
    fn test_fr_004_rounding_before_overage_check() {
        let config = RateConfig {
            rounding_rule: RoundingRule::QuarterHour,
            ..flat_config()
        };
        // 4h05m rounds to 4.0h: no overage
        let amounts = compute_flat_rate(&window("08:00", "12:05"), RateType::HalfDay, &config)
            .unwrap();
        assert!(!amounts.overage_applied);

        // 4h08m rounds to 4.25h: overage
        let amounts = compute_flat_rate(&window("08:00", "12:08"), RateType::HalfDay, &config)
            .unwrap();
        assert!(amounts.overage_applied);
    }

    #[test]
    fn test_custom_overage_multiplier() {
        let config = RateConfig {
            flat_overage_multiplier: dec("1.25"),
            ..flat_config()
        };
        let amounts =
            compute_flat_rate(&window("08:00", "20:00"), RateType::FullDay, &config).unwrap();
        assert_eq!(amounts.tech_amount, dec("500"));
    }

    #[test]
    fn test_hourly_rate_type_rejected() {
        match compute_flat_rate(&window("08:00", "12:00"), RateType::Hourly, &flat_config()) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "rate_type"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_flat_rate_names_field() {
        let config = RateConfig {
            bill_full_day_rate: None,
            ..flat_config()
        };
        match compute_flat_rate(&window("08:00", "18:00"), RateType::FullDay, &config) {
            Err(EngineError::Config { field, .. }) => assert_eq!(field, "bill_full_day_rate"),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_length_rejected() {
        let result = compute_flat_rate(&window("08:00", "08:00"), RateType::HalfDay, &flat_config());
        assert!(matches!(result, Err(EngineError::Validation { .. })));
    }
}
