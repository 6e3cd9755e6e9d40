//! Rate calculation logic for the AV Labor Engine.
//!
//! Pure functions converting an assignment's time window and a resolved
//! [`RateConfig`](crate::config::RateConfig) into hour buckets, technician
//! payout and customer billing: rounding, the double-time window, overtime
//! bucketing, hourly pricing and flat day rates. Nothing here performs I/O
//! or logs.

mod assignment;
mod double_time;
mod flat_rate;
mod hours_breakdown;
mod payout;
mod rounding;

pub use assignment::calculate_assignment;
pub use double_time::{double_time_hours, double_time_minutes};
pub use flat_rate::compute_flat_rate;
pub use hours_breakdown::compute_hours_breakdown;
pub use payout::{compute_billing, compute_payout};
pub use rounding::{OUTPUT_DECIMAL_PLACES, round_hours, round_money, round_output_hours};
