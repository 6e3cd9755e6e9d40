//! Conflict checks run against a candidate assignment.
//!
//! Each check compares the candidate with a snapshot of the existing
//! assignments. The persisted copy of the candidate (same `id`) is skipped so
//! that editing an assignment never conflicts with itself. Enforcing
//! double-booking under concurrent writes belongs to the persistence layer;
//! these checks only see the snapshot they are given.

use rust_decimal::Decimal;

use crate::models::{Assignment, AssignmentCandidate};

use super::overlap::windows_overlap;
use super::report::{ConflictKind, ConflictRecord, ConflictReport};

/// Finds existing assignments that put the candidate's technician in two
/// places at once.
///
/// Returns one blocking `TechDoubleBooked` record per overlapping
/// assignment, in the order they appear in `existing`.
pub fn find_technician_conflicts(
    candidate: &AssignmentCandidate,
    existing: &[Assignment],
) -> Vec<ConflictRecord> {
    let window = candidate.window();

    others(candidate, existing)
        .filter(|a| a.technician_id == candidate.technician_id)
        .filter(|a| windows_overlap(&window, &a.window()))
        .map(|a| {
            let message = format!(
                "Technician {} is already assigned {}-{} on {} (assignment {})",
                a.technician_id, a.start_time, a.end_time, a.date, a.id
            );
            ConflictRecord {
                conflicting_assignment_id: Some(a.id.clone()),
                ..ConflictRecord::new(ConflictKind::TechDoubleBooked, message)
            }
        })
        .collect()
}

/// Finds existing assignments that use the candidate's location at an
/// overlapping time.
///
/// A candidate without a location produces no records, and existing
/// assignments without a location are never compared.
pub fn find_location_conflicts(
    candidate: &AssignmentCandidate,
    existing: &[Assignment],
) -> Vec<ConflictRecord> {
    let Some(location_id) = candidate.location_id.as_deref() else {
        return Vec::new();
    };
    let window = candidate.window();

    others(candidate, existing)
        .filter(|a| a.location_id.as_deref() == Some(location_id))
        .filter(|a| windows_overlap(&window, &a.window()))
        .map(|a| {
            let message = format!(
                "Location {} is already staffed by technician {} {}-{} on {} (assignment {})",
                location_id, a.technician_id, a.start_time, a.end_time, a.date, a.id
            );
            ConflictRecord {
                conflicting_assignment_id: Some(a.id.clone()),
                ..ConflictRecord::new(ConflictKind::LocationConflict, message)
            }
        })
        .collect()
}

/// Checks the technician's total hours on the candidate's date against the
/// daily cap.
///
/// Hours are attributed to the date an assignment starts on. Returns a
/// `DailyCapExceeded` warning carrying `exceeded_by` when the total is
/// strictly above `max_hours_per_day`.
///
/// # Example
///
/// ```
/// use av_labor_engine::models::{Assignment, AssignmentCandidate};
/// use av_labor_engine::scheduling::check_daily_hour_cap;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let existing = vec![Assignment {
///     id: "asg_001".to_string(),
///     technician_id: "tech_001".to_string(),
///     location_id: None,
///     event_id: None,
///     requirement_id: None,
///     date,
///     start_time: "06:00".parse().unwrap(),
///     end_time: "16:00".parse().unwrap(),
///     hours_worked: Decimal::from(10),
///     rate_type: Default::default(),
/// }];
/// let candidate = AssignmentCandidate {
///     id: None,
///     technician_id: "tech_001".to_string(),
///     location_id: None,
///     event_id: None,
///     requirement_id: None,
///     date,
///     start_time: "16:00".parse().unwrap(),
///     end_time: "00:00".parse().unwrap(),
///     hours_worked: None,
///     rate_type: Default::default(),
/// };
///
/// let record = check_daily_hour_cap(&candidate, &existing, Decimal::from(16)).unwrap();
/// assert_eq!(record.exceeded_by, Some(Decimal::from(2)));
/// ```
pub fn check_daily_hour_cap(
    candidate: &AssignmentCandidate,
    existing: &[Assignment],
    max_hours_per_day: Decimal,
) -> Option<ConflictRecord> {
    let total = others(candidate, existing)
        .filter(|a| a.technician_id == candidate.technician_id)
        .map(|a| a.hours_worked)
        .fold(candidate.hours(), Decimal::saturating_add);

    if total <= max_hours_per_day {
        return None;
    }

    let exceeded_by = (total - max_hours_per_day).normalize();
    let message = format!(
        "Technician {} would work {} hours on {}, {} over the {} hour daily limit",
        candidate.technician_id,
        total.normalize(),
        candidate.date,
        exceeded_by,
        max_hours_per_day.normalize()
    );
    Some(ConflictRecord {
        exceeded_by: Some(exceeded_by),
        ..ConflictRecord::new(ConflictKind::DailyCapExceeded, message)
    })
}

/// Runs every conflict check for a candidate assignment.
///
/// Records are ordered technician conflicts, then location conflicts, then
/// the daily cap. The result depends only on the inputs, so validating the
/// same snapshot twice yields the same report.
///
/// # Example
///
/// ```
/// use av_labor_engine::models::AssignmentCandidate;
/// use av_labor_engine::scheduling::validate;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let candidate = AssignmentCandidate {
///     id: None,
///     technician_id: "tech_001".to_string(),
///     location_id: Some("ballroom_a".to_string()),
///     event_id: None,
///     requirement_id: None,
///     date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
///     start_time: "09:00".parse().unwrap(),
///     end_time: "17:00".parse().unwrap(),
///     hours_worked: None,
///     rate_type: Default::default(),
/// };
///
/// let report = validate(&candidate, &[], Decimal::from(16));
/// assert!(report.is_valid);
/// assert!(report.is_clean());
/// ```
pub fn validate(
    candidate: &AssignmentCandidate,
    existing: &[Assignment],
    max_hours_per_day: Decimal,
) -> ConflictReport {
    let mut records = find_technician_conflicts(candidate, existing);
    records.extend(find_location_conflicts(candidate, existing));
    records.extend(check_daily_hour_cap(candidate, existing, max_hours_per_day));
    ConflictReport::from_records(records)
}

/// Existing assignments on the candidate's date, minus the candidate itself.
fn others<'a>(
    candidate: &'a AssignmentCandidate,
    existing: &'a [Assignment],
) -> impl Iterator<Item = &'a Assignment> + 'a {
    existing
        .iter()
        .filter(move |a| a.date == candidate.date && !candidate.is_same_assignment(a))
}
