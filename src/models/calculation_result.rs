//! Calculation result models for the AV Labor Engine.
//!
//! This module contains the structures the rate engine returns: the hours
//! breakdown of a shift, the technician payout and customer billing amounts,
//! flat-rate amounts, and the [`AssignmentCalculation`] that ties them
//! together with an audit trail.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{RateType, TimeWindow};

/// Hours of one shift split into pay buckets.
///
/// Double-time hours are carved out of the total rather than added on top
/// of it, so `base_hours + ot_hours + dt_hours == total_hours` up to the
/// 2 dp rounding of each figure.
///
/// # Example
///
/// ```
/// use av_labor_engine::models::HoursBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = HoursBreakdown {
///     total_hours: Decimal::from(10),
///     base_hours: Decimal::from(8),
///     ot_hours: Decimal::from(2),
///     dt_hours: Decimal::ZERO,
/// };
/// assert!(breakdown.base_hours + breakdown.ot_hours <= breakdown.total_hours);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursBreakdown {
    /// Total hours after the rounding rule was applied.
    pub total_hours: Decimal,
    /// Hours paid at the base rate.
    pub base_hours: Decimal,
    /// Hours paid at the overtime multiplier.
    pub ot_hours: Decimal,
    /// Hours inside the double-time window.
    pub dt_hours: Decimal,
}

impl HoursBreakdown {
    /// A breakdown with no hours in any bucket.
    pub const ZERO: HoursBreakdown = HoursBreakdown {
        total_hours: Decimal::ZERO,
        base_hours: Decimal::ZERO,
        ot_hours: Decimal::ZERO,
        dt_hours: Decimal::ZERO,
    };
}

/// Technician payout for one assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutAmounts {
    /// Pay for base hours.
    pub base_pay: Decimal,
    /// Pay for overtime hours.
    pub ot_pay: Decimal,
    /// Pay for double-time hours.
    pub dt_pay: Decimal,
    /// Total pay, rounded once from the unrounded components.
    pub total_pay: Decimal,
}

/// Customer billing for one assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAmounts {
    /// Bill for base hours.
    pub base_bill: Decimal,
    /// Bill for overtime hours.
    pub ot_bill: Decimal,
    /// Bill for double-time hours.
    pub dt_bill: Decimal,
    /// Total bill, rounded once from the unrounded components.
    pub total_bill: Decimal,
}

/// Flat half-day or full-day amounts for one assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRateAmounts {
    /// The flat rate type that was applied.
    pub rate_type: RateType,
    /// Rounded hours the assignment spans.
    pub total_hours: Decimal,
    /// Nominal hours covered by the flat rate.
    pub nominal_hours: Decimal,
    /// Whether the overage multiplier was applied.
    pub overage_applied: bool,
    /// Amount paid to the technician.
    pub tech_amount: Decimal,
    /// Amount billed to the customer.
    pub bill_amount: Decimal,
}

/// A single step in the audit trail recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete priced result for one assignment.
///
/// Exactly one of (`payout`, `billing`) or `flat_rate` is populated,
/// depending on the rate type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentCalculation {
    /// The window that was priced.
    pub window: TimeWindow,
    /// How the assignment was priced.
    pub rate_type: RateType,
    /// Hours split into buckets.
    pub hours: HoursBreakdown,
    /// Hourly technician payout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout: Option<PayoutAmounts>,
    /// Hourly customer billing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<BillingAmounts>,
    /// Flat-rate amounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat_rate: Option<FlatRateAmounts>,
    /// Total amount owed to the technician.
    pub tech_total: Decimal,
    /// Total amount billed to the customer.
    pub bill_total: Decimal,
    /// Every rule applied, in order.
    pub audit_steps: Vec<AuditStep>,
}

impl AssignmentCalculation {
    /// Returns the margin between billing and payout.
    pub fn margin(&self) -> Decimal {
        self.bill_total - self.tech_total
    }
}
