//! Full pricing of a single assignment.
//!
//! Combines the hours breakdown with either hourly payout and billing or
//! flat-rate amounts, recording each rule applied as an [`AuditStep`].

use rust_decimal::Decimal;

use crate::config::RateConfig;
use crate::error::EngineResult;
use crate::models::{
    AssignmentCalculation, AuditStep, BillingAmounts, FlatRateAmounts, HoursBreakdown,
    PayoutAmounts, RateType, TimeWindow,
};

use super::flat_rate::compute_flat_rate;
use super::hours_breakdown::compute_hours_breakdown;
use super::payout::{compute_billing, compute_payout};

/// Prices one assignment end to end.
///
/// Hourly assignments get a payout and a billing computed from the hours
/// breakdown. Half-day and full-day assignments get flat amounts; their
/// hours breakdown is still reported so schedules show real hours.
///
/// # Errors
///
/// Propagates [`compute_hours_breakdown`] and [`compute_flat_rate`] errors.
///
/// # Example
///
/// ```
/// use av_labor_engine::calculation::calculate_assignment;
/// use av_labor_engine::config::RateConfig;
/// use av_labor_engine::models::{RateType, TimeWindow};
/// use rust_decimal::Decimal;
///
/// let config = RateConfig {
///     ot_threshold_hours: Decimal::from(8),
///     tech_hourly_rate: Decimal::from(40),
///     bill_hourly_rate: Decimal::from(70),
///     ..RateConfig::default()
/// };
/// let window = TimeWindow::parse("2025-06-01", "09:00", "19:00").unwrap();
///
/// let result = calculate_assignment(&window, RateType::Hourly, &config).unwrap();
/// assert_eq!(result.tech_total, Decimal::from(440));
/// assert_eq!(result.bill_total, Decimal::from(770));
/// assert_eq!(result.audit_steps.len(), 3);
/// ```
pub fn calculate_assignment(
    window: &TimeWindow,
    rate_type: RateType,
    config: &RateConfig,
) -> EngineResult<AssignmentCalculation> {
    let mut audit_steps = Vec::new();
    let mut step_number: u32 = 1;

    let hours = compute_hours_breakdown(window, config)?;
    audit_steps.push(hours_breakdown_step(step_number, window, config, &hours));
    step_number += 1;

    if rate_type.is_flat() {
        let flat = compute_flat_rate(window, rate_type, config)?;
        audit_steps.push(flat_rate_step(step_number, config, &flat));

        return Ok(AssignmentCalculation {
            window: *window,
            rate_type,
            hours,
            payout: None,
            billing: None,
            flat_rate: Some(flat),
            tech_total: flat.tech_amount,
            bill_total: flat.bill_amount,
            audit_steps,
        });
    }

    let payout = compute_payout(
        &hours,
        config.tech_hourly_rate,
        config.ot_multiplier,
        config.dt_multiplier,
    );
    audit_steps.push(payout_step(step_number, config, &hours, &payout));
    step_number += 1;

    let billing = compute_billing(
        &hours,
        config.bill_hourly_rate,
        config.effective_bill_ot_multiplier(),
        config.effective_bill_dt_multiplier(),
    );
    audit_steps.push(billing_step(step_number, config, &hours, &billing));

    Ok(AssignmentCalculation {
        window: *window,
        rate_type,
        hours,
        payout: Some(payout),
        billing: Some(billing),
        flat_rate: None,
        tech_total: payout.total_pay,
        bill_total: billing.total_bill,
        audit_steps,
    })
}

fn hours_breakdown_step(
    step_number: u32,
    window: &TimeWindow,
    config: &RateConfig,
    hours: &HoursBreakdown,
) -> AuditStep {
    let reasoning = if window.is_overnight() {
        format!(
            "Overnight shift {}-{} ({} min) rounded {:?} to {} hours: {} base, {} OT, {} DT",
            window.start_time,
            window.end_time,
            window.duration_minutes(),
            config.rounding_rule,
            hours.total_hours.normalize(),
            hours.base_hours.normalize(),
            hours.ot_hours.normalize(),
            hours.dt_hours.normalize()
        )
    } else {
        format!(
            "Shift {}-{} ({} min) rounded {:?} to {} hours: {} base, {} OT, {} DT",
            window.start_time,
            window.end_time,
            window.duration_minutes(),
            config.rounding_rule,
            hours.total_hours.normalize(),
            hours.base_hours.normalize(),
            hours.ot_hours.normalize(),
            hours.dt_hours.normalize()
        )
    };

    AuditStep {
        step_number,
        rule_id: "hours_breakdown".to_string(),
        rule_name: "Hours Breakdown".to_string(),
        input: serde_json::json!({
            "date": window.date.to_string(),
            "start_time": window.start_time.to_string(),
            "end_time": window.end_time.to_string(),
            "ot_threshold_hours": config.ot_threshold_hours.normalize().to_string(),
            "dt_window": format!(
                "{:02}:00-{:02}:00",
                config.dt_window_start_hour, config.dt_window_end_hour
            ),
            "rounding_rule": config.rounding_rule,
        }),
        output: serde_json::json!({
            "total_hours": hours.total_hours.normalize().to_string(),
            "base_hours": hours.base_hours.normalize().to_string(),
            "ot_hours": hours.ot_hours.normalize().to_string(),
            "dt_hours": hours.dt_hours.normalize().to_string(),
        }),
        reasoning,
    }
}

fn payout_step(
    step_number: u32,
    config: &RateConfig,
    hours: &HoursBreakdown,
    payout: &PayoutAmounts,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "technician_payout".to_string(),
        rule_name: "Technician Payout".to_string(),
        input: rate_input(
            hours,
            config.tech_hourly_rate,
            config.ot_multiplier,
            config.dt_multiplier,
        ),
        output: serde_json::json!({
            "base_pay": payout.base_pay.to_string(),
            "ot_pay": payout.ot_pay.to_string(),
            "dt_pay": payout.dt_pay.to_string(),
            "total_pay": payout.total_pay.to_string(),
        }),
        reasoning: format!(
            "{} base hours × ${} + {} OT hours × ${} × {} + {} DT hours × ${} × {} = ${}",
            hours.base_hours.normalize(),
            config.tech_hourly_rate.normalize(),
            hours.ot_hours.normalize(),
            config.tech_hourly_rate.normalize(),
            config.ot_multiplier.normalize(),
            hours.dt_hours.normalize(),
            config.tech_hourly_rate.normalize(),
            config.dt_multiplier.normalize(),
            payout.total_pay
        ),
    }
}

fn billing_step(
    step_number: u32,
    config: &RateConfig,
    hours: &HoursBreakdown,
    billing: &BillingAmounts,
) -> AuditStep {
    let ot_multiplier = config.effective_bill_ot_multiplier();
    let dt_multiplier = config.effective_bill_dt_multiplier();

    AuditStep {
        step_number,
        rule_id: "customer_billing".to_string(),
        rule_name: "Customer Billing".to_string(),
        input: rate_input(hours, config.bill_hourly_rate, ot_multiplier, dt_multiplier),
        output: serde_json::json!({
            "base_bill": billing.base_bill.to_string(),
            "ot_bill": billing.ot_bill.to_string(),
            "dt_bill": billing.dt_bill.to_string(),
            "total_bill": billing.total_bill.to_string(),
        }),
        reasoning: format!(
            "{} base hours × ${} + {} OT hours × ${} × {} + {} DT hours × ${} × {} = ${}",
            hours.base_hours.normalize(),
            config.bill_hourly_rate.normalize(),
            hours.ot_hours.normalize(),
            config.bill_hourly_rate.normalize(),
            ot_multiplier.normalize(),
            hours.dt_hours.normalize(),
            config.bill_hourly_rate.normalize(),
            dt_multiplier.normalize(),
            billing.total_bill
        ),
    }
}

fn flat_rate_step(step_number: u32, config: &RateConfig, flat: &FlatRateAmounts) -> AuditStep {
    let reasoning = if flat.overage_applied {
        format!(
            "{} hours exceeds {} nominal hours for {}, flat rates × {}: tech ${}, bill ${}",
            flat.total_hours.normalize(),
            flat.nominal_hours.normalize(),
            flat.rate_type,
            config.flat_overage_multiplier.normalize(),
            flat.tech_amount,
            flat.bill_amount
        )
    } else {
        format!(
            "{} hours within {} nominal hours for {}: tech ${}, bill ${}",
            flat.total_hours.normalize(),
            flat.nominal_hours.normalize(),
            flat.rate_type,
            flat.tech_amount,
            flat.bill_amount
        )
    };

    AuditStep {
        step_number,
        rule_id: "flat_rate".to_string(),
        rule_name: "Flat Day Rate".to_string(),
        input: serde_json::json!({
            "rate_type": flat.rate_type,
            "total_hours": flat.total_hours.normalize().to_string(),
            "nominal_hours": flat.nominal_hours.normalize().to_string(),
            "overage_multiplier": config.flat_overage_multiplier.normalize().to_string(),
        }),
        output: serde_json::json!({
            "overage_applied": flat.overage_applied,
            "tech_amount": flat.tech_amount.to_string(),
            "bill_amount": flat.bill_amount.to_string(),
        }),
        reasoning,
    }
}

fn rate_input(
    hours: &HoursBreakdown,
    rate: Decimal,
    ot_multiplier: Decimal,
    dt_multiplier: Decimal,
) -> serde_json::Value {
    serde_json::json!({
        "base_hours": hours.base_hours.normalize().to_string(),
        "ot_hours": hours.ot_hours.normalize().to_string(),
        "dt_hours": hours.dt_hours.normalize().to_string(),
        "rate": rate.normalize().to_string(),
        "ot_multiplier": ot_multiplier.normalize().to_string(),
        "dt_multiplier": dt_multiplier.normalize().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, RoundingRule};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn window(start: &str, end: &str) -> TimeWindow {
        TimeWindow::parse("2025-06-01", start, end).unwrap()
    }

    fn load_rates() -> RateConfig {
        ConfigLoader::load("config/av_default")
            .unwrap()
            .rates()
            .clone()
    }

    // CA-001: hourly day shift with overtime using the default config
    #[test]
    fn test_ca_001_hourly_with_overtime() {
        let config = load_rates();
        // 07:00-19:30 = 12.5h, threshold 10, no DT
        let result = calculate_assignment(&window("07:00", "19:30"), RateType::Hourly, &config)
            .unwrap();

        assert_eq!(result.hours.base_hours, dec("10"));
        assert_eq!(result.hours.ot_hours, dec("2.5"));
        // 10 × 45 + 2.5 × 45 × 1.5 = 450 + 168.75
        assert_eq!(result.tech_total, dec("618.75"));
        // 10 × 75 + 2.5 × 75 × 1.5 = 750 + 281.25
        assert_eq!(result.bill_total, dec("1031.25"));
        assert_eq!(result.margin(), dec("412.5"));
        assert!(result.flat_rate.is_none());
    }

    // CA-002: overnight load-out with double time
    #[test]
    fn test_ca_002_overnight_load_out() {
        let config = load_rates();
        // 16:00-02:00 = 10h, 20:00-02:00 DT = 6h, 4h base
        let result = calculate_assignment(&window("16:00", "02:00"), RateType::Hourly, &config)
            .unwrap();

        assert_eq!(result.hours.dt_hours, dec("6"));
        assert_eq!(result.hours.base_hours, dec("4"));
        let payout = result.payout.unwrap();
        assert_eq!(payout.base_pay, dec("180"));
        assert_eq!(payout.dt_pay, dec("540"));
        assert_eq!(payout.total_pay, dec("720"));
    }

    // CA-003: half day with overage
    #[test]
    fn test_ca_003_half_day_overage() {
        let config = load_rates();
        let result = calculate_assignment(&window("08:00", "14:00"), RateType::HalfDay, &config)
            .unwrap();

        assert!(result.payout.is_none());
        assert!(result.billing.is_none());
        let flat = result.flat_rate.unwrap();
        assert!(flat.overage_applied);
        assert_eq!(result.tech_total, dec("300"));
        assert_eq!(result.bill_total, dec("487.5"));
        assert_eq!(result.hours.total_hours, dec("6"));
    }

    #[test]
    fn test_audit_steps_in_order_for_hourly() {
        let result = calculate_assignment(
            &window("09:00", "17:00"),
            RateType::Hourly,
            &RateConfig::default(),
        )
        .unwrap();

        let ids: Vec<&str> = result.audit_steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["hours_breakdown", "technician_payout", "customer_billing"]);
        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_audit_steps_for_flat_rate() {
        let result = calculate_assignment(
            &window("08:00", "12:00"),
            RateType::HalfDay,
            &load_rates(),
        )
        .unwrap();

        let ids: Vec<&str> = result.audit_steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["hours_breakdown", "flat_rate"]);
        assert_eq!(result.audit_steps[1].output["overage_applied"], false);
        assert!(result.audit_steps[1].reasoning.contains("within"));
    }

    #[test]
    fn test_hours_step_mentions_overnight() {
        let config = RateConfig {
            rounding_rule: RoundingRule::HalfHour,
            ..RateConfig::default()
        };
        let result =
            calculate_assignment(&window("22:00", "02:00"), RateType::Hourly, &config).unwrap();

        let step = &result.audit_steps[0];
        assert!(step.reasoning.starts_with("Overnight shift 22:00-02:00"));
        assert_eq!(step.input["rounding_rule"], "half-hour");
        assert_eq!(step.output["dt_hours"], "4");
    }

    #[test]
    fn test_distinct_bill_multipliers_used() {
        let config = RateConfig {
            ot_threshold_hours: dec("8"),
            dt_window_start_hour: 0,
            dt_window_end_hour: 0,
            tech_hourly_rate: dec("40"),
            bill_hourly_rate: dec("60"),
            bill_ot_multiplier: Some(dec("2")),
            ..RateConfig::default()
        };
        let result = calculate_assignment(&window("08:00", "18:00"), RateType::Hourly, &config)
            .unwrap();

        // tech: 8 × 40 + 2 × 40 × 1.5 = 440; bill: 8 × 60 + 2 × 60 × 2 = 720
        assert_eq!(result.tech_total, dec("440"));
        assert_eq!(result.bill_total, dec("720"));
        assert_eq!(result.audit_steps[2].input["ot_multiplier"], "2");
    }

    #[test]
    fn test_errors_propagate() {
        let result = calculate_assignment(
            &window("10:00", "10:00"),
            RateType::Hourly,
            &RateConfig::default(),
        );
        assert!(result.is_err());
    }
}
