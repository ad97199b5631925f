//! The appointment submission pipeline:
//! validate → load credentials → append row → acknowledge.
//!
//! Any step short-circuits to an error response; nothing is retried. A
//! retried client request appends a second row — there is no idempotency key
//! and no deduplication.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use std::sync::Arc;

use dentbook_core::{
    errors::BookingError,
    models::{AcceptedAppointment, AppointmentRequest, SubmitAppointmentResponse},
    validation::validate_request,
};
use dentbook_sheets::AppointmentRow;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn submit_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<AppointmentRequest>,
) -> Result<Json<SubmitAppointmentResponse>, AppError> {
    let now = Utc::now();

    // Validation failures carry their specific reason; no external call has
    // happened yet.
    validate_request(&payload, now.date_naive())?;

    // Locale-style submission stamp, e.g. "03/15/2026, 10:30:00 AM".
    // Informational only; never parsed.
    let timestamp = now.format("%m/%d/%Y, %r").to_string();

    let name = payload.name.trim().to_string();
    let email = payload.email.trim().to_string();
    let row = AppointmentRow {
        timestamp: timestamp.clone(),
        name: name.clone(),
        phone: payload.phone.trim().to_string(),
        email: email.clone(),
        date: payload.date.clone(),
        message: payload.message.trim().to_string(),
    };

    // Bounded append: a hung upstream call fails the request rather than
    // hanging it.
    let result = tokio::time::timeout(state.upstream_timeout, state.sink.append(row))
        .await
        .unwrap_or_else(|_| {
            Err(BookingError::Upstream(format!(
                "sheet append timed out after {:?}",
                state.upstream_timeout
            )))
        });

    result.map_err(|err| AppError::with_details(err, state.include_error_details))?;

    Ok(Json(SubmitAppointmentResponse {
        success: true,
        message: "Appointment submitted successfully. We'll contact you soon!".to_string(),
        data: AcceptedAppointment {
            name,
            email,
            date: payload.date,
            timestamp,
        },
    }))
}

/// Cross-origin preflight acknowledgement: 200, no body. The CORS layer
/// attaches the permissive headers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Fallback for every verb other than POST and OPTIONS on the appointment
/// route.
pub async fn method_not_allowed() -> AppError {
    AppError::new(BookingError::MethodNotAllowed)
}
