//! HTTP API module for the AV Labor Engine.
//!
//! A thin adapter over the in-process operations: conflict validation and
//! assignment pricing, sharing the loaded configuration across requests.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculateRequest, ValidateRequest};
pub use response::{ApiError, ApiErrorResponse, CalculateResponse};
pub use state::AppState;
