//! Error types for the booking server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable identifiers surfaced to API callers, one per failure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthenticated = 2,
    Forbidden = 3,
    DbFailure = 4,
    NotFound = 5,
    BadValue = 6,
    InvalidTimeRange = 7,
    PastTime = 8,
    AppointmentNotPending = 9,
    AppointmentNotPendingOrConfirmed = 10,
    Conflict = 11,
}

/// Rejected appointment status change
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Appointment is not pending")]
    NotPending,

    #[error("Appointment is not pending or confirmed")]
    NotPendingOrConfirmed,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("End time must be after start time")]
    InvalidTimeRange,

    #[error("Start time must be in the future")]
    PastTime,

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(#[from] TransitionError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable identifier for this failure kind
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Authentication(_) => ErrorCode::NotAuthenticated,
            AppError::Forbidden(_) => ErrorCode::Forbidden,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Validation(_) | AppError::BadRequest(_) => ErrorCode::BadValue,
            AppError::InvalidTimeRange => ErrorCode::InvalidTimeRange,
            AppError::PastTime => ErrorCode::PastTime,
            AppError::InvalidStateTransition(TransitionError::NotPending) => {
                ErrorCode::AppointmentNotPending
            }
            AppError::InvalidStateTransition(TransitionError::NotPendingOrConfirmed) => {
                ErrorCode::AppointmentNotPendingOrConfirmed
            }
            AppError::Conflict(_) => ErrorCode::Conflict,
            AppError::Database(_) => ErrorCode::DbFailure,
            AppError::Internal(_) => ErrorCode::Failure,
        }
    }
}

// PostgreSQL SQLSTATE codes that mean "this write collides with existing data"
const UNIQUE_VIOLATION: &str = "23505";
const EXCLUSION_VIOLATION: &str = "23P01";
const FOREIGN_KEY_VIOLATION: &str = "23503";

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        let code = e
            .as_database_error()
            .and_then(|db| db.code())
            .map(|code| code.into_owned());

        match code.as_deref() {
            Some(EXCLUSION_VIOLATION) => {
                AppError::Conflict("Appointment time conflicts with existing appointment".to_string())
            }
            Some(UNIQUE_VIOLATION) => AppError::Conflict("Resource already exists".to_string()),
            Some(FOREIGN_KEY_VIOLATION) => {
                AppError::NotFound("Referenced resource not found".to_string())
            }
            _ => AppError::Database(e),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
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
        let code = self.code();
        let (status, message) = match &self {
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) | AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::InvalidTimeRange | AppError::PastTime => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::InvalidStateTransition(e) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_errors_have_distinct_codes() {
        let not_pending = AppError::from(TransitionError::NotPending);
        let not_cancellable = AppError::from(TransitionError::NotPendingOrConfirmed);
        assert_eq!(not_pending.code(), ErrorCode::AppointmentNotPending);
        assert_eq!(not_cancellable.code(), ErrorCode::AppointmentNotPendingOrConfirmed);
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::InvalidTimeRange, StatusCode::BAD_REQUEST),
            (AppError::PastTime, StatusCode::BAD_REQUEST),
            (AppError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (AppError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (AppError::Conflict("taken".into()), StatusCode::CONFLICT),
            (
                AppError::InvalidStateTransition(TransitionError::NotPending),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_row_not_found_stays_database_error() {
        let error = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(error.code(), ErrorCode::DbFailure);
    }
}
