//! Technician payout and customer billing.
//!
//! Both sides price an [`HoursBreakdown`] the same way, each with its own
//! base rate and multipliers:
//!
//! - base = base hours × rate
//! - OT = OT hours × rate × OT multiplier
//! - DT = DT hours × rate × DT multiplier
//!
//! The total is the unrounded sum rounded once to cents. Each component is
//! rounded to cents on its own for display, so the displayed components may
//! differ from the total by a cent.

use rust_decimal::Decimal;

use crate::models::{BillingAmounts, HoursBreakdown, PayoutAmounts};

use super::rounding::round_money;

/// Unrounded amounts for each bucket.
#[derive(Debug, Clone, Copy)]
struct PricedHours {
    base: Decimal,
    ot: Decimal,
    dt: Decimal,
}

impl PricedHours {
    fn price(
        breakdown: &HoursBreakdown,
        rate: Decimal,
        ot_multiplier: Decimal,
        dt_multiplier: Decimal,
    ) -> Self {
        Self {
            base: breakdown.base_hours * rate,
            ot: breakdown.ot_hours * rate * ot_multiplier,
            dt: breakdown.dt_hours * rate * dt_multiplier,
        }
    }

    fn total(&self) -> Decimal {
        round_money(self.base + self.ot + self.dt)
    }
}

/// Computes the technician payout for a breakdown.
///
/// # Example
///
/// ```
/// use av_labor_engine::calculation::compute_payout;
/// use av_labor_engine::models::HoursBreakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let breakdown = HoursBreakdown {
///     total_hours: Decimal::from(12),
///     base_hours: Decimal::from(8),
///     ot_hours: Decimal::from(2),
///     dt_hours: Decimal::from(2),
/// };
///
/// let pay = compute_payout(
///     &breakdown,
///     Decimal::from(40),
///     Decimal::from_str("1.5").unwrap(),
///     Decimal::from(2),
/// );
/// assert_eq!(pay.base_pay, Decimal::from(320));
/// assert_eq!(pay.ot_pay, Decimal::from(120));
/// assert_eq!(pay.dt_pay, Decimal::from(160));
/// assert_eq!(pay.total_pay, Decimal::from(600));
/// ```
pub fn compute_payout(
    breakdown: &HoursBreakdown,
    rate: Decimal,
    ot_multiplier: Decimal,
    dt_multiplier: Decimal,
) -> PayoutAmounts {
    let priced = PricedHours::price(breakdown, rate, ot_multiplier, dt_multiplier);
    PayoutAmounts {
        base_pay: round_money(priced.base),
        ot_pay: round_money(priced.ot),
        dt_pay: round_money(priced.dt),
        total_pay: priced.total(),
    }
}

/// Computes the customer billing for a breakdown.
///
/// Mirrors [`compute_payout`] with the billing rate and multipliers.
pub fn compute_billing(
    breakdown: &HoursBreakdown,
    rate: Decimal,
    ot_multiplier: Decimal,
    dt_multiplier: Decimal,
) -> BillingAmounts {
    let priced = PricedHours::price(breakdown, rate, ot_multiplier, dt_multiplier);
    BillingAmounts {
        base_bill: round_money(priced.base),
        ot_bill: round_money(priced.ot),
        dt_bill: round_money(priced.dt),
        total_bill: priced.total(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn breakdown(total: &str, base: &str, ot: &str, dt: &str) -> HoursBreakdown {
        HoursBreakdown {
            total_hours: dec(total),
            base_hours: dec(base),
            ot_hours: dec(ot),
            dt_hours: dec(dt),
        }
    }

    // PAY-001: base hours only
    #[test]
    fn test_pay_001_base_only() {
        let pay = compute_payout(&breakdown("8", "8", "0", "0"), dec("45"), dec("1.5"), dec("2"));
        assert_eq!(pay.base_pay, dec("360"));
        assert_eq!(pay.ot_pay, dec("0"));
        assert_eq!(pay.dt_pay, dec("0"));
        assert_eq!(pay.total_pay, dec("360"));
    }

    // PAY-002: overtime at 1.5x
    #[test]
    fn test_pay_002_overtime() {
        let pay = compute_payout(&breakdown("10", "8", "2", "0"), dec("45"), dec("1.5"), dec("2"));
        assert_eq!(pay.ot_pay, dec("135"));
        assert_eq!(pay.total_pay, dec("495"));
    }

    // PAY-003: overnight shift fully in double time
    #[test]
    fn test_pay_003_double_time() {
        let pay = compute_payout(&breakdown("4", "0", "0", "4"), dec("45"), dec("1.5"), dec("2"));
        assert_eq!(pay.base_pay, dec("0"));
        assert_eq!(pay.dt_pay, dec("360"));
        assert_eq!(pay.total_pay, dec("360"));
    }

    // PAY-004: total rounded once from unrounded components
    #[test]
    fn test_pay_004_total_rounded_once() {
        // Each term is 0.005 and rounds up to a cent; the sum 0.015 rounds to 0.02.
        let pay = compute_payout(
            &breakdown("0.03", "0.01", "0.01", "0.01"),
            dec("0.5"),
            dec("1"),
            dec("1"),
        );
        assert_eq!(pay.base_pay, dec("0.01"));
        assert_eq!(pay.ot_pay, dec("0.01"));
        assert_eq!(pay.dt_pay, dec("0.01"));
        assert_eq!(pay.total_pay, dec("0.02"));
    }

    // PAY-005: fractional hours
    #[test]
    fn test_pay_005_fractional_hours() {
        let pay = compute_payout(
            &breakdown("8.67", "8", "0.67", "0"),
            dec("37.50"),
            dec("1.5"),
            dec("2"),
        );
        assert_eq!(pay.base_pay, dec("300"));
        // 0.67 * 37.50 * 1.5 = 37.6875
        assert_eq!(pay.ot_pay, dec("37.69"));
        assert_eq!(pay.total_pay, dec("337.69"));
    }

    #[test]
    fn test_zero_rate_pays_nothing() {
        let pay = compute_payout(&breakdown("10", "8", "2", "0"), dec("0"), dec("1.5"), dec("2"));
        assert_eq!(pay.total_pay, dec("0"));
    }

    // BILL-001: billing mirrors payout with its own rate and multipliers
    #[test]
    fn test_bill_001_distinct_multipliers() {
        let hours = breakdown("12", "8", "2", "2");
        let bill = compute_billing(&hours, dec("80"), dec("1.75"), dec("2.5"));
        assert_eq!(bill.base_bill, dec("640"));
        assert_eq!(bill.ot_bill, dec("280"));
        assert_eq!(bill.dt_bill, dec("400"));
        assert_eq!(bill.total_bill, dec("1320"));
    }

    #[test]
    fn test_billing_and_payout_agree_on_same_inputs() {
        let hours = breakdown("11.25", "10", "0.25", "1");
        let pay = compute_payout(&hours, dec("42"), dec("1.5"), dec("2"));
        let bill = compute_billing(&hours, dec("42"), dec("1.5"), dec("2"));
        assert_eq!(pay.total_pay, bill.total_bill);
        assert_eq!(pay.ot_pay, bill.ot_bill);
    }
}
