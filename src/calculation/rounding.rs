//! Hour and money rounding.
//!
//! All rounding here is round-half-up: ties go away from zero, so 8.25
//! hours rounded to the half hour is 8.5, never 8.0.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::RoundingRule;

/// Decimal places kept on hour figures and money amounts.
pub const OUTPUT_DECIMAL_PLACES: u32 = 2;

/// Rounds total shift hours according to a [`RoundingRule`].
///
/// # Examples
///
/// ```
/// use av_labor_engine::calculation::round_hours;
/// use av_labor_engine::config::RoundingRule;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let hours = Decimal::from_str("8.25").unwrap();
/// assert_eq!(round_hours(hours, RoundingRule::HalfHour), Decimal::from_str("8.5").unwrap());
/// assert_eq!(round_hours(hours, RoundingRule::FullHour), Decimal::from(8));
/// assert_eq!(round_hours(hours, RoundingRule::Exact), hours);
/// ```
pub fn round_hours(hours: Decimal, rule: RoundingRule) -> Decimal {
    match rule.increments_per_hour() {
        None => hours,
        Some(increments) => {
            let increments = Decimal::from(increments);
            (hours * increments).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                / increments
        }
    }
}

/// Rounds an hour figure to 2 decimal places for output.
pub fn round_output_hours(hours: Decimal) -> Decimal {
    hours.round_dp_with_strategy(OUTPUT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a money amount to cents.
///
/// # Example
///
/// ```
/// use av_labor_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(OUTPUT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn minutes_to_hours(minutes: i64) -> Decimal {
        Decimal::from(minutes) / Decimal::from(60)
    }

    #[test]
    fn test_exact_leaves_hours_alone() {
        let hours = minutes_to_hours(520);
        assert_eq!(round_hours(hours, RoundingRule::Exact), hours);
    }

    // RND-001: 8h40m to the half hour is 8.5
    #[test]
    fn test_rnd_001_8h40m_half_hour() {
        assert_eq!(
            round_hours(minutes_to_hours(520), RoundingRule::HalfHour),
            dec("8.5")
        );
    }

    // RND-002: ties at x.25 round up to the next half hour
    #[test]
    fn test_rnd_002_half_hour_tie_rounds_up() {
        assert_eq!(round_hours(dec("8.25"), RoundingRule::HalfHour), dec("8.5"));
        assert_eq!(round_hours(dec("8.75"), RoundingRule::HalfHour), dec("9"));
    }

    // RND-003: quarter hour rounding and its 7.5 minute ties
    #[test]
    fn test_rnd_003_quarter_hour() {
        assert_eq!(
            round_hours(minutes_to_hours(487), RoundingRule::QuarterHour),
            dec("8.0")
        );
        assert_eq!(round_hours(dec("8.125"), RoundingRule::QuarterHour), dec("8.25"));
        assert_eq!(
            round_hours(minutes_to_hours(488), RoundingRule::QuarterHour),
            dec("8.25")
        );
    }

    // RND-004: full hour rounding
    #[test]
    fn test_rnd_004_full_hour() {
        assert_eq!(round_hours(dec("8.5"), RoundingRule::FullHour), dec("9"));
        assert_eq!(round_hours(dec("8.49"), RoundingRule::FullHour), dec("8"));
        assert_eq!(round_hours(dec("0.4"), RoundingRule::FullHour), dec("0"));
    }

    #[test]
    fn test_round_output_hours() {
        assert_eq!(round_output_hours(minutes_to_hours(520)), dec("8.67"));
        assert_eq!(round_output_hours(minutes_to_hours(20)), dec("0.33"));
    }

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec("2.345")), dec("2.35"));
        assert_eq!(round_money(dec("2.344")), dec("2.34"));
        assert_eq!(round_money(dec("100")), dec("100"));
    }
}
