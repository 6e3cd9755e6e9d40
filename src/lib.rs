//! Labor rate engine and scheduling conflict detector for AV event staffing.
//!
//! This crate prices technician assignments (base, overtime and double-time
//! hours, hourly or flat half-day/full-day rates, technician payout and
//! customer billing) and checks candidate assignments against existing ones
//! for double-booking, shared locations and daily hour caps.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduling;
