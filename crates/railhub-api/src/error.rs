//! Maps domain errors to HTTP responses.
//!
//! Every engine failure keeps a stable, machine-readable error code so
//! clients can distinguish, say, a sold-out train from a lost race.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use railhub_core::error::{AppError, ErrorKind};
use railhub_service::booking::BookingError;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error type returned by all handlers.
///
/// Wraps the two domain error types so `?` works on both.
#[derive(Debug)]
pub enum ApiError {
    /// General application error.
    App(AppError),
    /// Booking engine error.
    Booking(BookingError),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        Self::Booking(err)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::App(AppError::validation(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            Self::App(err) => {
                let (status, code) = app_error_parts(&err);
                if status.is_server_error() {
                    tracing::error!(error = %err, "Request failed");
                }
                (status, code, err.message, None)
            }
            Self::Booking(err) => booking_error_parts(err),
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

fn app_error_parts(err: &AppError) -> (StatusCode, &'static str) {
    match err.kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::ServiceUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        ErrorKind::Internal | ErrorKind::Database | ErrorKind::Configuration => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    }
}

fn booking_error_parts(
    err: BookingError,
) -> (StatusCode, &'static str, String, Option<serde_json::Value>) {
    let message = err.to_string();
    match err {
        BookingError::TrainNotFound => (StatusCode::NOT_FOUND, "TRAIN_NOT_FOUND", message, None),
        BookingError::InsufficientSeats {
            available,
            requested,
        } => (
            StatusCode::BAD_REQUEST,
            "INSUFFICIENT_SEATS",
            message,
            Some(serde_json::json!({
                "available_seats": available,
                "requested_seats": requested,
            })),
        ),
        BookingError::DailyLimitReached => {
            (StatusCode::CONFLICT, "BOOKING_LIMIT_REACHED", message, None)
        }
        BookingError::ConcurrentConflict => {
            (StatusCode::CONFLICT, "CONCURRENT_CONFLICT", message, None)
        }
        BookingError::BookingNotFound => {
            (StatusCode::NOT_FOUND, "BOOKING_NOT_FOUND", message, None)
        }
        BookingError::AlreadyCancelled => {
            (StatusCode::CONFLICT, "ALREADY_CANCELLED", message, None)
        }
        BookingError::WindowExpired => (
            StatusCode::BAD_REQUEST,
            "CANCELLATION_WINDOW_EXPIRED",
            message,
            None,
        ),
        BookingError::Storage(inner) => {
            tracing::error!(error = %inner, "Booking storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An unexpected error occurred during booking".to_string(),
                None,
            )
        }
    }
}
