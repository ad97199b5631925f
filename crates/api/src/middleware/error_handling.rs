//! # Error Handling
//!
//! Maps domain errors onto HTTP responses with one policy: validation
//! failures surface their specific reason to the caller, every server-side
//! failure is logged in full and reported with a deliberately generic
//! message. Raw error text reaches the response body only in development
//! mode.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use dentbook_core::errors::BookingError;
use dentbook_core::models::ApiErrorBody;

/// Application error wrapper that provides the HTTP mapping for
/// [`BookingError`].
#[derive(Debug)]
pub struct AppError {
    pub error: BookingError,
    /// Attach the raw error text as `details` (development mode)
    pub include_details: bool,
}

impl AppError {
    pub fn new(error: BookingError) -> Self {
        Self {
            error,
            include_details: false,
        }
    }

    pub fn with_details(error: BookingError, include_details: bool) -> Self {
        Self {
            error,
            include_details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self.error {
            BookingError::Validation(reason) => {
                let body = ApiErrorBody {
                    success: false,
                    error: reason.clone(),
                    details: None,
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }

            BookingError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({ "error": "Method not allowed" })),
            )
                .into_response(),

            BookingError::Configuration(_) => self.server_error(
                "Server configuration error. Please contact the administrator.",
            ),

            BookingError::UpstreamAccess(_) => self.server_error(
                "Unable to access the appointment sheet. Please try again later.",
            ),

            BookingError::Upstream(_) => {
                self.server_error("Failed to submit appointment. Please try again later.")
            }
        }
    }
}

impl AppError {
    /// Builds a 500 response with a generic client-facing message. The full
    /// error is logged here; the body carries it only in development mode.
    fn server_error(&self, public_message: &str) -> Response {
        error!(error = %self.error, "appointment submission failed");

        let body = ApiErrorBody {
            success: false,
            error: public_message.to_string(),
            details: self.include_details.then(|| self.error.to_string()),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Automatic conversion from BookingError to AppError
///
/// Allows the `?` operator in handlers for call sites that don't need the
/// development-mode flag (validation errors, method gating).
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError::new(err)
    }
}
