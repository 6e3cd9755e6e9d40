//! Double-time window calculation.
//!
//! The double-time (DT) window is a fixed span of clock hours, typically
//! late night, during which every hour is paid at the DT multiplier no
//! matter how long the shift has run. Both the window and the shift may
//! cross midnight.

use rust_decimal::Decimal;

use crate::config::RateConfig;
use crate::models::{MINUTES_PER_DAY, TimeWindow};

/// Returns the number of shift minutes that fall inside the DT window.
///
/// Works on the unrounded clock times of the shift. The shift is placed on
/// a minute axis starting at midnight of its date; DT windows opening the
/// day before, the same day, and the day after are intersected with it,
/// which covers every combination of overnight shift and overnight window.
///
/// # Example
///
/// ```
/// use av_labor_engine::calculation::double_time_minutes;
/// use av_labor_engine::config::RateConfig;
/// use av_labor_engine::models::TimeWindow;
///
/// let config = RateConfig {
///     dt_window_start_hour: 20,
///     dt_window_end_hour: 4,
///     ..RateConfig::default()
/// };
///
/// // 18:00-23:00: three hours after 20:00
/// let window = TimeWindow::parse("2025-06-01", "18:00", "23:00").unwrap();
/// assert_eq!(double_time_minutes(&window, &config), 180);
///
/// // 02:00-06:00: two hours before 04:00, from the window that opened the night before
/// let window = TimeWindow::parse("2025-06-01", "02:00", "06:00").unwrap();
/// assert_eq!(double_time_minutes(&window, &config), 120);
/// ```
pub fn double_time_minutes(window: &TimeWindow, config: &RateConfig) -> u32 {
    if !config.has_dt_window() || window.is_zero_length() {
        return 0;
    }

    let (shift_start, shift_end) = window.span_minutes();
    let (shift_start, shift_end) = (i64::from(shift_start), i64::from(shift_end));

    // Hours are taken modulo 24 so an unvalidated config cannot underflow.
    let day = i64::from(MINUTES_PER_DAY);
    let start_hour = i64::from(config.dt_window_start_hour);
    let end_hour = i64::from(config.dt_window_end_hour);
    let dt_start = start_hour.rem_euclid(24) * 60;
    let dt_length = (end_hour - start_hour).rem_euclid(24) * 60;

    let minutes: i64 = (-1..=1)
        .map(|offset| {
            let start = offset * day + dt_start;
            overlap_minutes(shift_start, shift_end, start, start + dt_length)
        })
        .sum();

    // A shift is at most one day long and the DT window less than a day, so
    // the windows intersected above never overlap each other.
    u32::try_from(minutes).unwrap_or(0)
}

/// Returns the DT minutes of a shift expressed in hours.
pub fn double_time_hours(window: &TimeWindow, config: &RateConfig) -> Decimal {
    Decimal::from(double_time_minutes(window, config)) / Decimal::from(60)
}

fn overlap_minutes(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> i64 {
    (a_end.min(b_end) - a_start.max(b_start)).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(start: u32, end: u32) -> RateConfig {
        RateConfig {
            dt_window_start_hour: start,
            dt_window_end_hour: end,
            ..RateConfig::default()
        }
    }

    fn window(start: &str, end: &str) -> TimeWindow {
        TimeWindow::parse("2025-06-01", start, end).unwrap()
    }

    // DT-001: overnight shift entirely inside an overnight window
    #[test]
    fn test_dt_001_overnight_shift_inside_overnight_window() {
        assert_eq!(double_time_minutes(&window("22:00", "02:00"), &config(20, 4)), 240);
    }

    // DT-002: day shift never touches the window
    #[test]
    fn test_dt_002_day_shift_no_overlap() {
        assert_eq!(double_time_minutes(&window("09:00", "19:00"), &config(20, 4)), 0);
    }

    // DT-003: evening shift running into the window
    #[test]
    fn test_dt_003_evening_shift_partial_overlap() {
        assert_eq!(double_time_minutes(&window("16:00", "22:30"), &config(20, 4)), 150);
    }

    // DT-004: early morning shift catches the tail of last night's window
    #[test]
    fn test_dt_004_early_morning_tail() {
        assert_eq!(double_time_minutes(&window("03:00", "11:00"), &config(20, 4)), 60);
    }

    // DT-005: overnight shift spanning the whole window plus both edges
    #[test]
    fn test_dt_005_shift_covers_whole_window() {
        assert_eq!(double_time_minutes(&window("18:00", "06:00"), &config(20, 4)), 480);
    }

    // DT-006: same-day window (00:00-06:00) hit by an overnight shift
    #[test]
    fn test_dt_006_same_day_window_overnight_shift() {
        assert_eq!(double_time_minutes(&window("22:00", "07:00"), &config(0, 6)), 360);
    }

    // DT-007: same-day window hit by a shift on the same date
    #[test]
    fn test_dt_007_same_day_window_same_day_shift() {
        assert_eq!(double_time_minutes(&window("05:00", "09:00"), &config(0, 6)), 60);
    }

    #[test]
    fn test_out_of_range_hours_wrap_instead_of_panicking() {
        // 30:00 wraps to 06:00, giving a 06:00-04:00 window
        assert_eq!(double_time_minutes(&window("05:00", "07:00"), &config(30, 4)), 60);
        // 28:00 wraps to 04:00, the same hour the window closes
        assert_eq!(double_time_minutes(&window("22:00", "06:00"), &config(28, 4)), 0);
    }

    #[test]
    fn test_disabled_window() {
        assert_eq!(double_time_minutes(&window("22:00", "02:00"), &config(3, 3)), 0);
    }

    #[test]
    fn test_zero_length_shift_has_no_dt() {
        assert_eq!(double_time_minutes(&window("22:00", "22:00"), &config(20, 4)), 0);
    }

    #[test]
    fn test_dt_window_ending_at_shift_start() {
        // Half-open interval: 04:00 itself is not double time.
        assert_eq!(double_time_minutes(&window("04:00", "12:00"), &config(20, 4)), 0);
    }

    #[test]
    fn test_minute_precision() {
        assert_eq!(double_time_minutes(&window("19:50", "20:10"), &config(20, 4)), 10);
        assert_eq!(
            double_time_hours(&window("19:30", "21:00"), &config(20, 4)),
            Decimal::ONE
        );
    }
}
