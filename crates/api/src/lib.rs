//! # Dentbook API
//!
//! The web server for the clinic's appointment-request form. One POST
//! endpoint validates a submission and hands it to the booking sheet; the
//! rest is plumbing around it.
//!
//! ## Architecture
//!
//! - **Routes**: endpoint definitions, including the OPTIONS preflight and
//!   method gating for the appointment route
//! - **Handlers**: the validate → credentials → append pipeline
//! - **Middleware**: mapping of domain errors to HTTP responses
//! - **Config**: environment configuration

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement the submission pipeline
pub mod handlers;
/// Error-to-response mapping
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, Method, header};
use eyre::Result;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use dentbook_sheets::AppointmentSink;

/// Shared application state available to every request handler.
pub struct ApiState {
    /// Destination for accepted appointment rows
    pub sink: Arc<dyn AppointmentSink>,
    /// Attach raw error detail to 500 bodies (development mode only)
    pub include_error_details: bool,
    /// Bound on the outbound append, so a hung upstream fails the request
    /// instead of hanging it
    pub upstream_timeout: Duration,
}

/// Builds the application router: API routes, the static form as fallback,
/// and the permissive CORS layer every response carries.
pub fn app(state: Arc<ApiState>) -> Router {
    // The form is posted cross-origin with credentials allowed, which rules
    // out a literal `*` origin; mirroring the request origin is the
    // permissive equivalent tower-http accepts.
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("x-csrf-token"),
        ])
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true);

    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Appointment submission endpoint
        .merge(routes::appointments::routes())
        // The presentation form and other static assets
        .fallback_service(ServeDir::new("static"))
        // Attach shared state to all routes
        .with_state(state)
        .layer(cors)
}

/// Starts the API server with the provided configuration and sink.
pub async fn start_server(
    config: config::ApiConfig,
    sink: Arc<dyn AppointmentSink>,
) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState {
        sink,
        include_error_details: config.development,
        upstream_timeout: Duration::from_secs(config.upstream_timeout),
    });

    let app = app(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout,
        )));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
