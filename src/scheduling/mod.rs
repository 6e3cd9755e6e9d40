//! Scheduling conflict detection for the AV Labor Engine.
//!
//! Given a candidate assignment and a snapshot of existing assignments,
//! reports technician double-booking (blocking), shared locations and daily
//! hour caps (overridable warnings), and summarizes requirement coverage.
//! Every function is pure.

mod conflicts;
mod coverage;
mod overlap;
mod report;

pub use conflicts::{check_daily_hour_cap, find_location_conflicts, find_technician_conflicts, validate};
pub use coverage::{CoverageStatus, CoverageSummary, event_coverage, requirement_coverage};
pub use overlap::{time_windows_overlap, windows_overlap};
pub use report::{ConflictKind, ConflictRecord, ConflictReport, Severity};
