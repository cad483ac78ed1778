//! Response types for the Timesheet Payroll Engine API.
//!
//! This module defines the report and tariff response bodies plus the error
//! response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{EmployeeOutcome, TariffBand};
use crate::error::EngineError;
use crate::models::{CompanyCostItem, DayRecord, EmployeeSummary, ReportMonth};

/// Body of a successful `/report` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    /// Identifier of this report, also logged as the correlation id.
    pub report_id: Uuid,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Crate version that produced the report.
    pub engine_version: String,
    /// Reporting month.
    pub month: ReportMonth,
    /// Cost items applied to every employee.
    pub company_cost_items: Vec<CompanyCostItem>,
    /// Sum of the cost items.
    pub company_cost_total: i64,
    /// One entry per requested employee, in request order.
    pub employees: Vec<EmployeeResult>,
}

/// Per-employee outcome in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EmployeeResult {
    /// The employee's day records and totals.
    Ok {
        /// Employee name.
        name: String,
        /// One record per day of the month.
        days: Vec<DayRecord>,
        /// Monthly totals.
        summary: EmployeeSummary,
    },
    /// Why the employee could not be reported on.
    Error {
        /// Employee name as submitted.
        name: String,
        /// What went wrong.
        error: ApiError,
    },
}

impl From<EmployeeOutcome> for EmployeeResult {
    fn from(outcome: EmployeeOutcome) -> Self {
        match outcome.result {
            Ok(report) => EmployeeResult::Ok {
                name: report.summary.name.clone(),
                days: report.days,
                summary: report.summary,
            },
            Err(err) => EmployeeResult::Error {
                name: outcome.name,
                error: ApiErrorResponse::from(err).error,
            },
        }
    }
}

/// Body of the `/tariff` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffResponse {
    /// Bands in ascending order.
    pub bands: Vec<TariffBand>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid input for '{}': {}", field, message),
                    field,
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}
