//! HTTP request handlers for the Timesheet Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::PayrollRun;
use crate::models::{EmployeeTimesheet, ReportMonth};

use super::request::ReportRequest;
use super::response::{
    ApiError, ApiErrorResponse, EmployeeResult, ReportResponse, TariffResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/report", post(report_handler))
        .route("/tariff", get(tariff_handler))
        .with_state(state)
}

/// Handler for POST /report endpoint.
///
/// Accepts a month, optional cost items and a list of employees, and returns
/// a report with one result per employee. An employee whose input cannot be
/// processed gets an error entry; the others are still reported.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
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
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    // The month applies to every employee, so a bad one fails the request.
    let month: ReportMonth = match request.month.parse() {
        Ok(month) => month,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                month = %request.month,
                error = %err,
                "Invalid report month"
            );
            let api_error: ApiErrorResponse = err.into();
            return (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response();
        }
    };

    if let Some(item) = request
        .company_cost_items
        .iter()
        .flatten()
        .find(|item| item.amount < 0)
    {
        warn!(
            correlation_id = %correlation_id,
            label = %item.label,
            "Negative company cost item"
        );
        let error = ApiError::with_details(
            "INVALID_INPUT",
            format!("Company cost item '{}' has a negative amount", item.label),
            "company_cost_items",
        );
        return (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, "application/json")],
            Json(error),
        )
            .into_response();
    }

    // Convert request types to domain types
    let timesheets: Vec<EmployeeTimesheet> = request.employees.into_iter().map(Into::into).collect();

    let start_time = Instant::now();
    let config = state.config().config();
    let run = PayrollRun::new(month, config, state.tariff());
    let run = match request.company_cost_items.as_deref() {
        Some(items) => run.with_cost_items(items),
        None => run,
    };
    let company_cost_total = match run.employer_cost_total() {
        Ok(total) => total,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Rejected company cost items"
            );
            let api_error = ApiErrorResponse::from(err);
            return (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response();
        }
    };

    let employees: Vec<EmployeeResult> = run
        .process_all(&timesheets)
        .into_iter()
        .map(Into::into)
        .collect();
    let failed = employees
        .iter()
        .filter(|e| matches!(e, EmployeeResult::Error { .. }))
        .count();

    let response = ReportResponse {
        report_id: correlation_id,
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        month,
        company_cost_items: run.cost_items().to_vec(),
        company_cost_total,
        employees,
    };

    info!(
        correlation_id = %correlation_id,
        month = %month,
        employees_count = timesheets.len(),
        failed_count = failed,
        duration_us = start_time.elapsed().as_micros(),
        "Report completed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Handler for GET /tariff endpoint.
///
/// Returns the overtime tariff bands in ascending order.
async fn tariff_handler(State(state): State<AppState>) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Serving overtime tariff");

    Json(TariffResponse {
        bands: state.tariff().bands().to_vec(),
    })
}
