//! Form validation for appointment requests.
//!
//! Checks run in a fixed order and the first failure wins, so the caller can
//! surface a single field-level reason to the visitor. The current day is
//! injected rather than read from the clock, which keeps the function pure
//! and the past-date rule testable.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::errors::{BookingError, BookingResult};
use crate::models::AppointmentRequest;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-\+\(\)]{7,}$").unwrap());

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Validates a submitted appointment request against `today`.
///
/// Returns the first failing reason as a `BookingError::Validation`. A date
/// equal to `today` is accepted; only strictly earlier dates are rejected.
pub fn validate_request(request: &AppointmentRequest, today: NaiveDate) -> BookingResult<()> {
    if request.name.trim().is_empty() {
        return Err(BookingError::Validation("Name is required".to_string()));
    }

    if request.phone.trim().is_empty() {
        return Err(BookingError::Validation(
            "Phone number is required".to_string(),
        ));
    }

    if !PHONE_RE.is_match(request.phone.trim()) {
        return Err(BookingError::Validation(
            "Invalid phone number format".to_string(),
        ));
    }

    if !EMAIL_RE.is_match(&request.email) {
        return Err(BookingError::Validation(
            "Valid email address is required".to_string(),
        ));
    }

    if request.date.is_empty() {
        return Err(BookingError::Validation(
            "Preferred date is required".to_string(),
        ));
    }

    if !DATE_RE.is_match(&request.date) {
        return Err(BookingError::Validation(
            "Invalid date format. Use YYYY-MM-DD".to_string(),
        ));
    }

    // The pattern admits calendar-impossible dates like 2026-13-40; chrono
    // catches those here.
    let appointment_date = NaiveDate::parse_from_str(&request.date, "%Y-%m-%d")
        .map_err(|_| BookingError::Validation("Invalid date format. Use YYYY-MM-DD".to_string()))?;

    if appointment_date < today {
        return Err(BookingError::Validation(
            "Appointment date cannot be in the past".to_string(),
        ));
    }

    Ok(())
}
