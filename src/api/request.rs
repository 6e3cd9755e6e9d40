//! Request types for the AV Labor Engine API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RateOverrides;
use crate::error::{EngineError, EngineResult};
use crate::models::{Assignment, AssignmentCandidate, RateType};

/// Request body for the `/assignments/validate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    /// The assignment being created or edited.
    pub candidate: AssignmentCandidate,
    /// Snapshot of the assignments already saved.
    #[serde(default)]
    pub existing: Vec<Assignment>,
    /// Overrides the configured daily hour cap for this request.
    #[serde(default)]
    pub max_hours_per_day: Option<Decimal>,
}

impl ValidateRequest {
    /// Returns the daily cap to check against, rejecting non-positive values.
    pub fn max_hours_per_day(&self, configured: Decimal) -> EngineResult<Decimal> {
        match self.max_hours_per_day {
            Some(hours) if hours <= Decimal::ZERO => Err(EngineError::validation(
                "max_hours_per_day",
                format!("must be greater than 0, got {}", hours),
            )),
            Some(hours) => Ok(hours),
            None => Ok(configured),
        }
    }
}

/// Request body for the `/assignments/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// The assignment to price.
    pub candidate: AssignmentCandidate,
    /// Snapshot of the assignments already saved.
    #[serde(default)]
    pub existing: Vec<Assignment>,
    /// Prices the candidate as this rate type instead of its own.
    #[serde(default)]
    pub rate_type: Option<RateType>,
    /// Rate overrides layered on the global rates in order, typically the
    /// event's followed by the assignment's.
    #[serde(default)]
    pub overrides: Vec<RateOverrides>,
    /// Proceeds despite warnings. Blocking errors are never forced.
    #[serde(default)]
    pub force: bool,
}

impl CalculateRequest {
    /// Returns the rate type the candidate is priced at.
    pub fn effective_rate_type(&self) -> RateType {
        self.rate_type.unwrap_or(self.candidate.rate_type)
    }
}
