//! Error types for LabWatch server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes exposed to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    DbFailure = 2,
    NoSuchAsset = 3,
    NoSuchUsageLog = 4,
    NoSuchTicket = 5,
    NoSuchProject = 6,
    BadValue = 7,
    Duplicate = 8,
    AssetInUse = 9,
    OpenTicketExists = 10,
    QuoteRequired = 11,
    TicketCompleted = 12,
    InvalidTransition = 13,
    HolidayDataFailure = 14,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(BusinessRule),
}

/// Rejected domain-rule violations (spelled out so the UI can explain them)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessRule {
    #[error("asset is in use, a repair ticket cannot be created")]
    AssetInUse,

    #[error("asset already has an open repair ticket")]
    OpenTicketExists,

    #[error("vendor name and quote amount are both required to enter repair-pending")]
    QuoteRequired,

    #[error("ticket is completed and can no longer change state")]
    TicketCompleted,

    #[error("ticket state can only move forward")]
    BackwardTransition,
}

impl From<BusinessRule> for AppError {
    fn from(rule: BusinessRule) -> Self {
        AppError::BusinessRule(rule)
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchAsset, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::BusinessRule(rule) => {
                let code = match rule {
                    BusinessRule::AssetInUse => ErrorCode::AssetInUse,
                    BusinessRule::OpenTicketExists => ErrorCode::OpenTicketExists,
                    BusinessRule::QuoteRequired => ErrorCode::QuoteRequired,
                    BusinessRule::TicketCompleted => ErrorCode::TicketCompleted,
                    BusinessRule::BackwardTransition => ErrorCode::InvalidTransition,
                };
                (StatusCode::UNPROCESSABLE_ENTITY, code, rule.to_string())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
