//! Staffing requirement model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time_window::ClockTime;

/// A staffing need an event defines: a position, where and when, and how
/// many technicians are needed to fill it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Unique identifier for the requirement.
    pub id: String,
    /// The event that defines the requirement.
    pub event_id: String,
    /// The position to be filled (e.g. "A1", "Camera Op", "LED Tech").
    pub position: String,
    /// Where the position is stationed.
    #[serde(default)]
    pub location_id: Option<String>,
    /// The day the requirement starts.
    pub date: NaiveDate,
    /// Wall-clock start time.
    pub start_time: ClockTime,
    /// Wall-clock end time.
    pub end_time: ClockTime,
    /// How many technicians the position needs.
    pub needed_count: u32,
}
