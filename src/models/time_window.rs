//! Clock time and time window types.
//!
//! A [`TimeWindow`] is the stretch of work a technician is scheduled for on
//! one assignment. Times are wall-clock values at minute precision; a window
//! whose end is earlier than its start crosses midnight into the next day.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// A wall-clock time of day with minute precision.
///
/// Parsed from `"HH:MM"` (single-digit hours are accepted) or `"HH:MM:SS"`,
/// in which case the seconds are discarded. Serialized as `"HH:MM"`.
///
/// # Example
///
/// ```
/// use av_labor_engine::models::ClockTime;
///
/// let time: ClockTime = "22:30".parse().unwrap();
/// assert_eq!(time.minutes_since_midnight(), 1350);
/// assert_eq!(time.to_string(), "22:30");
///
/// assert!("24:00".parse::<ClockTime>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct ClockTime {
    minutes: u32,
}

impl ClockTime {
    /// Creates a clock time from an hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> EngineResult<Self> {
        if hour > 23 {
            return Err(EngineError::validation(
                "time",
                format!("hour must be 0-23, got {}", hour),
            ));
        }
        if minute > 59 {
            return Err(EngineError::validation(
                "time",
                format!("minute must be 0-59, got {}", minute),
            ));
        }
        Ok(Self {
            minutes: hour * 60 + minute,
        })
    }

    /// Parses a clock time, attributing any failure to `field`.
    pub fn parse_field(field: &str, value: &str) -> EngineResult<Self> {
        let trimmed = value.trim();
        let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map_err(|_| {
                EngineError::validation(
                    field,
                    format!("expected a time between 00:00 and 23:59, got '{}'", value),
                )
            })?;

        Ok(Self {
            minutes: parsed.hour() * 60 + parsed.minute(),
        })
    }

    /// Returns the number of minutes since midnight (0-1439).
    pub fn minutes_since_midnight(self) -> u32 {
        self.minutes
    }

    /// Returns the hour component (0-23).
    pub fn hour(self) -> u32 {
        self.minutes / 60
    }

    /// Returns the minute component (0-59).
    pub fn minute(self) -> u32 {
        self.minutes % 60
    }
}

impl FromStr for ClockTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_field("time", s)
    }
}

// Errors name the rejected value only; the deserializer's path supplies the field.
impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(|_| {
            de::Error::invalid_value(Unexpected::Str(&value), &"a time between 00:00 and 23:59")
        })
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A technician's scheduled stretch of work for one assignment.
///
/// If `end_time` is earlier than `start_time` the window is an overnight
/// shift ending on the day after `date`. Equal start and end times describe
/// a zero-length window, which the rate engine rejects.
///
/// # Example
///
/// ```
/// use av_labor_engine::models::TimeWindow;
///
/// let window = TimeWindow::parse("2025-06-01", "22:00", "02:00").unwrap();
/// assert!(window.is_overnight());
/// assert_eq!(window.duration_minutes(), 240);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// The calendar day the window starts on.
    pub date: NaiveDate,
    /// Wall-clock start time.
    pub start_time: ClockTime,
    /// Wall-clock end time (on the following day when overnight).
    pub end_time: ClockTime,
}

impl TimeWindow {
    /// Creates a window from already-parsed parts.
    pub fn new(date: NaiveDate, start_time: ClockTime, end_time: ClockTime) -> Self {
        Self {
            date,
            start_time,
            end_time,
        }
    }

    /// Parses a window from primitive strings.
    ///
    /// Failures name the offending field: `date`, `start_time` or `end_time`.
    pub fn parse(date: &str, start_time: &str, end_time: &str) -> EngineResult<Self> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
            EngineError::validation("date", format!("expected YYYY-MM-DD, got '{}'", date))
        })?;
        let start_time = ClockTime::parse_field("start_time", start_time)?;
        let end_time = ClockTime::parse_field("end_time", end_time)?;
        Ok(Self::new(date, start_time, end_time))
    }

    /// Returns true when the window crosses midnight.
    pub fn is_overnight(&self) -> bool {
        self.end_time < self.start_time
    }

    /// Returns true when start and end are the same clock time.
    pub fn is_zero_length(&self) -> bool {
        self.end_time == self.start_time
    }

    /// Returns the duration of the window in minutes.
    pub fn duration_minutes(&self) -> u32 {
        let start = self.start_time.minutes_since_midnight();
        let end = self.end_time.minutes_since_midnight();
        if end >= start {
            end - start
        } else {
            (MINUTES_PER_DAY - start) + end
        }
    }

    /// Returns the unrounded duration of the window in hours.
    pub fn duration_hours(&self) -> Decimal {
        Decimal::from(self.duration_minutes()) / Decimal::from(60)
    }

    /// Returns the window as a half-open `[start, end)` minute interval.
    ///
    /// Minute 0 is midnight at the start of `date`; overnight windows extend
    /// past [`MINUTES_PER_DAY`].
    pub fn span_minutes(&self) -> (u32, u32) {
        let start = self.start_time.minutes_since_midnight();
        (start, start + self.duration_minutes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn time(s: &str) -> ClockTime {
        ClockTime::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_hh_mm() {
        assert_eq!(time("09:00").minutes_since_midnight(), 540);
        assert_eq!(time("23:59").minutes_since_midnight(), 1439);
        assert_eq!(time("00:00").minutes_since_midnight(), 0);
    }

    #[test]
    fn test_parse_single_digit_hour() {
        assert_eq!(time("9:15").minutes_since_midnight(), 555);
    }

    #[test]
    fn test_parse_with_seconds_discards_seconds() {
        assert_eq!(time("17:30:45").minutes_since_midnight(), 1050);
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(ClockTime::from_str("24:00").is_err());
        assert!(ClockTime::from_str("12:60").is_err());
        assert!(ClockTime::from_str("-1:00").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = ClockTime::parse_field("start_time", "9am").unwrap_err();
        assert_eq!(err.field(), Some("start_time"));
        assert!(err.to_string().contains("9am"));
    }

    #[test]
    fn test_from_hm_bounds() {
        assert!(ClockTime::from_hm(23, 59).is_ok());
        assert!(ClockTime::from_hm(24, 0).is_err());
        assert!(ClockTime::from_hm(0, 60).is_err());
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(time("7:05").to_string(), "07:05");
    }

    #[test]
    fn test_serde_uses_string_form() {
        let json = serde_json::to_string(&time("06:30")).unwrap();
        assert_eq!(json, "\"06:30\"");

        let parsed: ClockTime = serde_json::from_str("\"21:45\"").unwrap();
        assert_eq!(parsed, time("21:45"));

        let err = serde_json::from_str::<ClockTime>("\"25:00\"").unwrap_err();
        assert!(err.to_string().contains("\"25:00\""), "{}", err);
        assert!(!err.to_string().contains("'time'"), "{}", err);
    }

    #[test]
    fn test_day_shift_duration() {
        let window = TimeWindow::parse("2025-06-01", "09:00", "17:30").unwrap();
        assert!(!window.is_overnight());
        assert_eq!(window.duration_minutes(), 510);
        assert_eq!(window.duration_hours(), Decimal::new(85, 1));
        assert_eq!(window.span_minutes(), (540, 1050));
    }

    #[test]
    fn test_overnight_duration() {
        let window = TimeWindow::parse("2025-06-01", "22:00", "06:00").unwrap();
        assert!(window.is_overnight());
        assert_eq!(window.duration_minutes(), 480);
        assert_eq!(window.span_minutes(), (1320, 1800));
    }

    #[test]
    fn test_ending_at_midnight_is_overnight() {
        let window = TimeWindow::parse("2025-06-01", "18:00", "00:00").unwrap();
        assert!(window.is_overnight());
        assert_eq!(window.duration_minutes(), 360);
    }

    #[test]
    fn test_zero_length_window() {
        let window = TimeWindow::parse("2025-06-01", "10:00", "10:00").unwrap();
        assert!(window.is_zero_length());
        assert!(!window.is_overnight());
        assert_eq!(window.duration_minutes(), 0);
    }

    #[test]
    fn test_parse_names_offending_field() {
        let err = TimeWindow::parse("2025-13-01", "09:00", "17:00").unwrap_err();
        assert_eq!(err.field(), Some("date"));

        let err = TimeWindow::parse("2025-06-01", "09:00", "17:75").unwrap_err();
        assert_eq!(err.field(), Some("end_time"));
    }

    #[test]
    fn test_window_deserialization() {
        let json = r#"{"date": "2025-06-01", "start_time": "08:00", "end_time": "12:00"}"#;
        let window: TimeWindow = serde_json::from_str(json).unwrap();
        assert_eq!(window.duration_minutes(), 240);
    }
}
