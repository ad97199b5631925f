use axum::http::StatusCode;
use axum::response::IntoResponse;

use dentbook_api::middleware::error_handling::AppError;
use dentbook_core::errors::BookingError;

#[tokio::test]
async fn test_error_handling_validation() {
    let error = BookingError::Validation("Name is required".to_string());

    let response = AppError::new(error).into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_method_not_allowed() {
    let error = BookingError::MethodNotAllowed;

    let response = AppError::new(error).into_response();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_error_handling_configuration() {
    let error = BookingError::Configuration("credential blob missing".to_string());

    let response = AppError::new(error).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_handling_upstream_access() {
    let error = BookingError::UpstreamAccess("sheet not shared".to_string());

    let response = AppError::new(error).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_handling_upstream() {
    let error = BookingError::Upstream("HTTP 502 from append".to_string());

    let response = AppError::new(error).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn server_errors_hide_detail_unless_development_mode_is_on() {
    let production = AppError::with_details(
        BookingError::Upstream("raw upstream text".to_string()),
        false,
    )
    .into_response();
    let bytes = axum::body::to_bytes(production.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(!String::from_utf8_lossy(&bytes).contains("raw upstream text"));

    let development = AppError::with_details(
        BookingError::Upstream("raw upstream text".to_string()),
        true,
    )
    .into_response();
    let bytes = axum::body::to_bytes(development.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("raw upstream text"));
}
