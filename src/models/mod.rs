//! Core data models for the AV Labor Engine.
//!
//! This module contains the domain models shared by the rate engine and
//! the conflict detector.

mod assignment;
mod calculation_result;
mod requirement;
mod time_window;

pub use assignment::{Assignment, AssignmentCandidate, RateType};
pub use calculation_result::{
    AssignmentCalculation, AuditStep, BillingAmounts, FlatRateAmounts, HoursBreakdown,
    PayoutAmounts,
};
pub use requirement::Requirement;
pub use time_window::{ClockTime, MINUTES_PER_DAY, TimeWindow};
