//! HTTP request handlers for the AV Labor Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_assignment;
use crate::scheduling::validate;

use super::request::{CalculateRequest, ValidateRequest};
use super::response::{ApiError, ApiErrorResponse, CalculateResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/assignments/validate", post(validate_handler))
        .route("/assignments/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for POST /assignments/validate.
///
/// Returns the conflict report for the candidate. Conflicts are data, so
/// this responds `200` whether or not the candidate is valid.
async fn validate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing validation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let max_hours_per_day = match request.max_hours_per_day(state.max_hours_per_day()) {
        Ok(hours) => hours,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid daily hour cap");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let start_time = Instant::now();
    let report = validate(&request.candidate, &request.existing, max_hours_per_day);
    info!(
        correlation_id = %correlation_id,
        technician_id = %request.candidate.technician_id,
        existing_count = request.existing.len(),
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Validation completed"
    );

    json_response(StatusCode::OK, &report)
}

/// Handler for POST /assignments/calculate.
///
/// Validates the candidate first. Blocking conflicts, or warnings the caller
/// has not forced past, refuse the calculation with `409` and the report.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let rates = match state.resolve_rates(&request.overrides) {
        Ok(rates) => rates,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid rate overrides");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let start_time = Instant::now();
    let report = validate(&request.candidate, &request.existing, state.max_hours_per_day());
    if !report.is_valid || (report.can_override && !request.force) {
        warn!(
            correlation_id = %correlation_id,
            technician_id = %request.candidate.technician_id,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            force = request.force,
            "Calculation refused due to scheduling conflicts"
        );
        let body = CalculateResponse {
            report,
            calculation: None,
        };
        return json_response(StatusCode::CONFLICT, &body);
    }

    let rate_type = request.effective_rate_type();
    match calculate_assignment(&request.candidate.window(), rate_type, &rates) {
        Ok(calculation) => {
            info!(
                correlation_id = %correlation_id,
                technician_id = %request.candidate.technician_id,
                rate_type = %rate_type,
                tech_total = %calculation.tech_total,
                bill_total = %calculation.bill_total,
                warnings = report.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            let body = CalculateResponse {
                report,
                calculation: Some(calculation),
            };
            json_response(StatusCode::OK, &body)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Calculation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Maps a JSON extraction failure to a `400` response.
///
/// Syntax errors are `MALFORMED_JSON`; well-formed JSON with missing or
/// invalid values (a bad clock time, an unknown rate type) is
/// `VALIDATION_ERROR`, naming the offending field when it can be recovered.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            let field = data_error_field(&body_text);
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                field = field.as_deref().unwrap_or("-"),
                "JSON data error"
            );
            ApiError {
                field,
                ..ApiError::new("VALIDATION_ERROR", body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

/// Recovers the field a deserialization error is about.
///
/// The body text reads `<prefix>: <path>: <detail>`, where the path is
/// dotted with array indices (`existing[1].start_time`). A missing field is
/// reported against its parent, so its name comes from the detail instead.
fn data_error_field(body_text: &str) -> Option<String> {
    if let Some((_, rest)) = body_text.split_once("missing field `") {
        return rest.split_once('`').map(|(name, _)| name.to_string());
    }

    let (_, detail) = body_text.split_once(": ")?;
    let (path, _) = detail.split_once(": ")?;
    if path.is_empty() || path.contains(char::is_whitespace) {
        return None;
    }

    let segment = path.rsplit('.').next()?;
    let name = segment.split('[').next()?;
    (!name.is_empty()).then(|| name.to_string())
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
