//! Requirement coverage: how many of the technicians a position needs have
//! been assigned.

use std::collections::BTreeSet;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{Assignment, Requirement};

/// How well a requirement is staffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    /// Nobody assigned yet.
    Unfilled,
    /// Some, but fewer than needed.
    Partial,
    /// Exactly as many as needed.
    Filled,
    /// More than needed.
    Overfilled,
}

impl CoverageStatus {
    fn from_counts(assigned: u32, needed: u32) -> Self {
        use std::cmp::Ordering;

        match assigned.cmp(&needed) {
            Ordering::Equal => CoverageStatus::Filled,
            Ordering::Greater => CoverageStatus::Overfilled,
            Ordering::Less if assigned == 0 => CoverageStatus::Unfilled,
            Ordering::Less => CoverageStatus::Partial,
        }
    }
}

/// Staffing summary for one requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// The requirement summarized.
    pub requirement_id: String,
    /// Distinct technicians assigned to the requirement.
    pub assigned: u32,
    /// Technicians the requirement needs.
    pub needed: u32,
    /// `assigned / needed` to 2 decimal places; 1 when nothing is needed.
    pub ratio: Decimal,
    /// Coverage classification.
    pub status: CoverageStatus,
}

/// Summarizes how well `requirement` is staffed by `assignments`.
///
/// Only assignments whose `requirement_id` matches count, and a technician
/// assigned twice to the same requirement counts once.
///
/// # Example
///
/// ```
/// use av_labor_engine::models::Requirement;
/// use av_labor_engine::scheduling::{CoverageStatus, requirement_coverage};
/// use chrono::NaiveDate;
///
/// let requirement = Requirement {
///     id: "req_a1".to_string(),
///     event_id: "evt_001".to_string(),
///     position: "A1".to_string(),
///     location_id: None,
///     date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
///     start_time: "08:00".parse().unwrap(),
///     end_time: "18:00".parse().unwrap(),
///     needed_count: 2,
/// };
///
/// let summary = requirement_coverage(&requirement, &[]);
/// assert_eq!(summary.status, CoverageStatus::Unfilled);
/// ```
pub fn requirement_coverage(requirement: &Requirement, assignments: &[Assignment]) -> CoverageSummary {
    let technicians: BTreeSet<&str> = assignments
        .iter()
        .filter(|a| a.requirement_id.as_deref() == Some(requirement.id.as_str()))
        .map(|a| a.technician_id.as_str())
        .collect();

    let assigned = u32::try_from(technicians.len()).unwrap_or(u32::MAX);
    let needed = requirement.needed_count;
    let ratio = if needed == 0 {
        Decimal::ONE
    } else {
        (Decimal::from(assigned) / Decimal::from(needed))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    };

    CoverageSummary {
        requirement_id: requirement.id.clone(),
        assigned,
        needed,
        ratio,
        status: CoverageStatus::from_counts(assigned, needed),
    }
}

/// Summarizes every requirement of an event, in the order given.
pub fn event_coverage(requirements: &[Requirement], assignments: &[Assignment]) -> Vec<CoverageSummary> {
    requirements
        .iter()
        .map(|requirement| requirement_coverage(requirement, assignments))
        .collect()
}
