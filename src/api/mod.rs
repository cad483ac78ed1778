//! HTTP API module for the Timesheet Payroll Engine.
//!
//! This module provides the REST API endpoints for producing monthly
//! timesheet and overtime payroll reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ClockEventRequest, EmployeeRequest, ReportRequest};
pub use response::{ApiError, EmployeeResult, ReportResponse, TariffResponse};
pub use state::AppState;
