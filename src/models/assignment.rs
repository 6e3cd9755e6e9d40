//! Assignment model and related types.
//!
//! An assignment places one technician on one event for one time window.
//! The engine never owns assignment lifecycle; it only evaluates snapshots
//! handed to it by the assignment service.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::time_window::{ClockTime, TimeWindow};

/// How an assignment is paid and billed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RateType {
    /// Hours are bucketed into base/OT/DT and priced per hour.
    #[default]
    Hourly,
    /// A flat half-day amount.
    HalfDay,
    /// A flat full-day amount.
    FullDay,
}

impl RateType {
    /// Returns true for half-day and full-day assignments.
    pub fn is_flat(self) -> bool {
        matches!(self, RateType::HalfDay | RateType::FullDay)
    }

    /// Returns the wire name of the rate type.
    pub fn as_str(self) -> &'static str {
        match self {
            RateType::Hourly => "hourly",
            RateType::HalfDay => "half-day",
            RateType::FullDay => "full-day",
        }
    }
}

impl std::fmt::Display for RateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted assignment, as read from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier for the assignment.
    pub id: String,
    /// The technician doing the work.
    pub technician_id: String,
    /// Where the technician is stationed, if decided yet.
    #[serde(default)]
    pub location_id: Option<String>,
    /// The event the assignment belongs to.
    #[serde(default)]
    pub event_id: Option<String>,
    /// The staffing requirement this assignment fills.
    #[serde(default)]
    pub requirement_id: Option<String>,
    /// The day the assignment starts.
    pub date: NaiveDate,
    /// Wall-clock start time.
    pub start_time: ClockTime,
    /// Wall-clock end time.
    pub end_time: ClockTime,
    /// Hours recorded for the assignment (used for daily caps).
    pub hours_worked: Decimal,
    /// How the assignment is priced.
    #[serde(default)]
    pub rate_type: RateType,
}

impl Assignment {
    /// Returns the assignment's time window.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.date, self.start_time, self.end_time)
    }
}

/// An assignment being created or edited, not yet persisted.
///
/// `id` is absent on create and present on update, in which case the
/// persisted copy of the same assignment is ignored by every check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentCandidate {
    /// Identifier of the assignment being edited, if any.
    #[serde(default)]
    pub id: Option<String>,
    /// The technician to be assigned.
    pub technician_id: String,
    /// Where the technician will be stationed, if decided yet.
    #[serde(default)]
    pub location_id: Option<String>,
    /// The event the assignment belongs to.
    #[serde(default)]
    pub event_id: Option<String>,
    /// The staffing requirement this assignment fills.
    #[serde(default)]
    pub requirement_id: Option<String>,
    /// The day the assignment starts.
    pub date: NaiveDate,
    /// Wall-clock start time.
    pub start_time: ClockTime,
    /// Wall-clock end time.
    pub end_time: ClockTime,
    /// Hours the assignment will count; derived from the window when absent.
    #[serde(default)]
    pub hours_worked: Option<Decimal>,
    /// How the assignment is priced.
    #[serde(default)]
    pub rate_type: RateType,
}

impl AssignmentCandidate {
    /// Returns the candidate's time window.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.date, self.start_time, self.end_time)
    }

    /// Returns the hours the candidate counts towards daily caps.
    ///
    /// # Example
    ///
    /// ```
    /// use av_labor_engine::models::AssignmentCandidate;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let candidate = AssignmentCandidate {
    ///     id: None,
    ///     technician_id: "tech_001".to_string(),
    ///     location_id: None,
    ///     event_id: None,
    ///     requirement_id: None,
    ///     date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    ///     start_time: "08:00".parse().unwrap(),
    ///     end_time: "12:30".parse().unwrap(),
    ///     hours_worked: None,
    ///     rate_type: Default::default(),
    /// };
    /// assert_eq!(candidate.hours(), Decimal::new(45, 1));
    /// ```
    pub fn hours(&self) -> Decimal {
        self.hours_worked
            .unwrap_or_else(|| self.window().duration_hours())
    }

    /// Returns true if `assignment` is the persisted copy of this candidate.
    pub fn is_same_assignment(&self, assignment: &Assignment) -> bool {
        self.id.as_deref() == Some(assignment.id.as_str())
    }
}
