//! Hours breakdown calculation.
//!
//! This module converts a shift's time window into the hour buckets that
//! drive pay and billing: base, overtime and double time.
//!
//! ## Algorithm
//!
//! 1. Duration from clock times; an end before the start is an overnight
//!    shift ending the next day.
//! 2. The rounding rule is applied to the **total** hours.
//! 3. DT hours are the overlap of the unrounded shift with the DT window,
//!    capped at the rounded total.
//! 4. The remaining hours fill base hours up to the OT threshold; anything
//!    past the threshold is overtime. DT hours are never split into OT.

use rust_decimal::Decimal;

use crate::config::RateConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{HoursBreakdown, TimeWindow};

use super::double_time::double_time_hours;
use super::rounding::{round_hours, round_output_hours};

/// Splits a shift into base, overtime and double-time hours.
///
/// Every figure in the result is rounded to 2 decimal places; the bucketing
/// itself is done on unrounded values.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] on `end_time` when the window has
/// zero length (start and end at the same clock time).
///
/// # Examples
///
/// ## Overtime
///
/// ```
/// use av_labor_engine::calculation::compute_hours_breakdown;
/// use av_labor_engine::config::RateConfig;
/// use av_labor_engine::models::TimeWindow;
/// use rust_decimal::Decimal;
///
/// let config = RateConfig {
///     ot_threshold_hours: Decimal::from(8),
///     ..RateConfig::default()
/// };
/// let window = TimeWindow::parse("2025-06-01", "09:00", "19:00").unwrap();
///
/// let hours = compute_hours_breakdown(&window, &config).unwrap();
/// assert_eq!(hours.total_hours, Decimal::from(10));
/// assert_eq!(hours.base_hours, Decimal::from(8));
/// assert_eq!(hours.ot_hours, Decimal::from(2));
/// assert_eq!(hours.dt_hours, Decimal::ZERO);
/// ```
///
/// ## Overnight inside the DT window
///
/// ```
/// use av_labor_engine::calculation::compute_hours_breakdown;
/// use av_labor_engine::config::RateConfig;
/// use av_labor_engine::models::TimeWindow;
/// use rust_decimal::Decimal;
///
/// let config = RateConfig {
///     ot_threshold_hours: Decimal::from(10),
///     dt_window_start_hour: 20,
///     dt_window_end_hour: 4,
///     ..RateConfig::default()
/// };
/// let window = TimeWindow::parse("2025-06-01", "22:00", "02:00").unwrap();
///
/// let hours = compute_hours_breakdown(&window, &config).unwrap();
/// assert_eq!(hours.total_hours, Decimal::from(4));
/// assert_eq!(hours.dt_hours, Decimal::from(4));
/// assert_eq!(hours.base_hours, Decimal::ZERO);
/// assert_eq!(hours.ot_hours, Decimal::ZERO);
/// ```
pub fn compute_hours_breakdown(
    window: &TimeWindow,
    config: &RateConfig,
) -> EngineResult<HoursBreakdown> {
    ensure_non_zero_length(window)?;

    let total_hours = round_hours(window.duration_hours(), config.rounding_rule);
    let dt_hours = double_time_hours(window, config).min(total_hours);

    let non_dt_hours = total_hours - dt_hours;
    let base_hours = non_dt_hours.min(config.ot_threshold_hours);
    let ot_hours = (non_dt_hours - config.ot_threshold_hours).max(Decimal::ZERO);

    let total_hours = round_output_hours(total_hours);
    let dt_hours = round_output_hours(dt_hours);
    let ot_hours = round_output_hours(ot_hours);
    // Rounding each bucket on its own could push base + ot a cent past the
    // total; base absorbs the difference.
    let base_hours = round_output_hours(base_hours).min(total_hours - ot_hours);

    Ok(HoursBreakdown {
        total_hours,
        base_hours,
        ot_hours,
        dt_hours,
    })
}

pub(super) fn ensure_non_zero_length(window: &TimeWindow) -> EngineResult<()> {
    if window.is_zero_length() {
        return Err(EngineError::validation(
            "end_time",
            format!(
                "shift starting and ending at {} has zero length",
                window.start_time
            ),
        ));
    }
    Ok(())
}
