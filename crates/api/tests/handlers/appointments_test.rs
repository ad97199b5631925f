use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

use dentbook_core::errors::{BookingError, BookingResult};
use dentbook_sheets::mock::MockSink;
use dentbook_sheets::{AppointmentRow, AppointmentSink};

use crate::test_utils::{app_with, app_with_timeout, server_with, tomorrow, valid_payload};

#[tokio::test]
async fn valid_submission_is_accepted_and_appended() {
    let mut sink = MockSink::new();
    sink.expect_append()
        .withf(|row: &AppointmentRow| {
            row.name == "Jane Doe"
                && row.phone == "+1 555 123 4567"
                && row.email == "jane@example.com"
                && row.message == "tooth pain"
                && !row.timestamp.is_empty()
        })
        .times(1)
        .returning(|_| Ok(()));

    let server = server_with(Arc::new(sink), false);
    let response = server.post("/api/appointments").json(&valid_payload()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Jane Doe");
    assert_eq!(body["data"]["email"], "jane@example.com");
    assert_eq!(body["data"]["date"], tomorrow());
    assert!(body["data"]["timestamp"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn whitespace_is_trimmed_before_the_row_is_written() {
    let mut sink = MockSink::new();
    sink.expect_append()
        .withf(|row: &AppointmentRow| row.name == "Jane Doe" && row.message.is_empty())
        .times(1)
        .returning(|_| Ok(()));

    let server = server_with(Arc::new(sink), false);
    let response = server
        .post("/api/appointments")
        .json(&json!({
            "name": "  Jane Doe  ",
            "phone": "+1 555 123 4567",
            "email": "jane@example.com",
            "date": tomorrow(),
            "message": "   "
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

// No deduplication is a documented contract: the same payload twice means
// two rows in the booking sheet. If dedup is ever added, this test must
// change with it.
#[tokio::test]
async fn identical_submissions_append_two_rows() {
    let mut sink = MockSink::new();
    sink.expect_append().times(2).returning(|_| Ok(()));

    let server = server_with(Arc::new(sink), false);
    let payload = valid_payload();

    let first = server.post("/api/appointments").json(&payload).await;
    let second = server.post("/api/appointments").json(&payload).await;

    assert_eq!(first.status_code(), StatusCode::OK);
    assert_eq!(second.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn validation_failure_names_the_first_bad_field_and_skips_the_sink() {
    let mut sink = MockSink::new();
    sink.expect_append().times(0);

    let server = server_with(Arc::new(sink), false);
    let response = server
        .post("/api/appointments")
        .json(&json!({
            "name": "",
            "phone": "123",
            "email": "bad",
            "date": "2000-01-01"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Name is required");
}

#[tokio::test]
async fn past_date_is_rejected() {
    let mut sink = MockSink::new();
    sink.expect_append().times(0);

    let server = server_with(Arc::new(sink), false);
    let response = server
        .post("/api/appointments")
        .json(&json!({
            "name": "Jane Doe",
            "phone": "+1 555 123 4567",
            "email": "jane@example.com",
            "date": "2000-01-01"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Appointment date cannot be in the past");
}

#[tokio::test]
async fn missing_credentials_return_a_generic_configuration_error() {
    let mut sink = MockSink::new();
    sink.expect_append().times(1).returning(|_| {
        Err(BookingError::Configuration(
            "GOOGLE_SERVICE_ACCOUNT_KEY environment variable not set".to_string(),
        ))
    });

    let server = server_with(Arc::new(sink), false);
    let response = server.post("/api/appointments").json(&valid_payload()).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "Server configuration error. Please contact the administrator."
    );
    // Production mode never leaks credential detail.
    assert!(body.get("details").is_none());
    assert!(!response.text().contains("GOOGLE_SERVICE_ACCOUNT_KEY"));
}

#[tokio::test]
async fn development_mode_attaches_raw_detail() {
    let mut sink = MockSink::new();
    sink.expect_append().times(1).returning(|_| {
        Err(BookingError::Configuration(
            "GOOGLE_SERVICE_ACCOUNT_KEY environment variable not set".to_string(),
        ))
    });

    let server = server_with(Arc::new(sink), true);
    let response = server.post("/api/appointments").json(&valid_payload()).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(
        body["details"]
            .as_str()
            .is_some_and(|s| s.contains("GOOGLE_SERVICE_ACCOUNT_KEY"))
    );
}

#[tokio::test]
async fn access_denied_upstream_maps_to_the_sheet_access_message() {
    let mut sink = MockSink::new();
    sink.expect_append().times(1).returning(|_| {
        Err(BookingError::UpstreamAccess(
            "The caller does not have permission".to_string(),
        ))
    });

    let server = server_with(Arc::new(sink), false);
    let response = server.post("/api/appointments").json(&valid_payload()).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Unable to access the appointment sheet. Please try again later."
    );
}

/// Sink that never finishes; drives the append timeout.
struct HungSink;

#[async_trait]
impl AppointmentSink for HungSink {
    async fn append(&self, _row: AppointmentRow) -> BookingResult<()> {
        tokio::time::sleep(Duration::from_secs(600)).await;
        Ok(())
    }
}

#[tokio::test]
async fn hung_upstream_fails_fast_with_a_generic_error() {
    let app = app_with_timeout(Arc::new(HungSink), false, Duration::from_millis(50));
    let server = axum_test::TestServer::new(app).expect("failed to build test server");

    let response = server.post("/api/appointments").json(&valid_payload()).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Failed to submit appointment. Please try again later."
    );
}

#[tokio::test]
async fn get_is_rejected_with_method_not_allowed() {
    let mut sink = MockSink::new();
    sink.expect_append().times(0);

    let app = app_with(Arc::new(sink), false);
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/appointments")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "Method not allowed" }));
}

#[tokio::test]
async fn preflight_answers_200_with_cors_headers_and_no_body() {
    let mut sink = MockSink::new();
    sink.expect_append().times(0);

    let app = app_with(Arc::new(sink), false);
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/appointments")
                .header("Origin", "https://clinic.example")
                .header("Access-Control-Request-Method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers().clone();
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://clinic.example")
    );
    assert_eq!(
        headers
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
    assert!(
        headers
            .get("access-control-allow-methods")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|methods| methods.contains("POST"))
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn success_responses_mirror_the_request_origin() {
    let mut sink = MockSink::new();
    sink.expect_append().times(1).returning(|_| Ok(()));

    let server = server_with(Arc::new(sink), false);
    let response = server
        .post("/api/appointments")
        .add_header(
            axum::http::HeaderName::from_static("origin"),
            axum::http::HeaderValue::from_static("https://clinic.example"),
        )
        .json(&valid_payload())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.header("access-control-allow-origin"),
        "https://clinic.example"
    );
}

#[tokio::test]
async fn health_check_responds_ok() {
    let sink = MockSink::new();
    let server = server_with(Arc::new(sink), false);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}
