//! Conflict records and the report returned by validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a conflict blocks saving the assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks the save.
    Error,
    /// Shown to the user, who may save anyway.
    Warning,
}

/// The kind of scheduling problem found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// The technician already works an overlapping assignment.
    TechDoubleBooked,
    /// Another assignment uses the same location at an overlapping time.
    LocationConflict,
    /// The technician's hours for the day exceed the daily cap.
    DailyCapExceeded,
}

impl ConflictKind {
    /// Returns the severity every conflict of this kind carries.
    ///
    /// Only double-booking a technician blocks: one person cannot be in two
    /// places at once.
    pub fn severity(self) -> Severity {
        match self {
            ConflictKind::TechDoubleBooked => Severity::Error,
            ConflictKind::LocationConflict | ConflictKind::DailyCapExceeded => Severity::Warning,
        }
    }
}

/// One scheduling problem found for a candidate assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRecord {
    /// What kind of conflict this is.
    pub kind: ConflictKind,
    /// Whether it blocks the save.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// The existing assignment the candidate collides with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_assignment_id: Option<String>,
    /// Hours over the daily cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exceeded_by: Option<Decimal>,
}

impl ConflictRecord {
    pub(super) fn new(kind: ConflictKind, message: String) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message,
            conflicting_assignment_id: None,
            exceeded_by: None,
        }
    }
}

/// The outcome of validating a candidate assignment.
///
/// # Example
///
/// ```
/// use av_labor_engine::scheduling::ConflictReport;
///
/// let report = ConflictReport::from_records(vec![]);
/// assert!(report.is_valid);
/// assert!(!report.can_override);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// True when there are no blocking errors.
    pub is_valid: bool,
    /// True when there are no errors but at least one warning, so the user
    /// must confirm before saving.
    pub can_override: bool,
    /// Blocking conflicts, in the order found.
    pub errors: Vec<ConflictRecord>,
    /// Overridable conflicts, in the order found.
    pub warnings: Vec<ConflictRecord>,
}

impl ConflictReport {
    /// Builds a report by splitting records on severity, keeping order.
    pub fn from_records(records: Vec<ConflictRecord>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = records
            .into_iter()
            .partition(|record| record.severity == Severity::Error);

        let is_valid = errors.is_empty();
        let can_override = is_valid && !warnings.is_empty();
        Self {
            is_valid,
            can_override,
            errors,
            warnings,
        }
    }

    /// Returns true when there is nothing to report at all.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Returns every record of the given kind, errors first.
    pub fn of_kind(&self, kind: ConflictKind) -> impl Iterator<Item = &ConflictRecord> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .filter(move |record| record.kind == kind)
    }
}
