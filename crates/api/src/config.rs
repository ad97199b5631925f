//! # API Configuration Module
//!
//! Loads server configuration from environment variables, with defaults
//! where a default is sensible.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: bind address (default: "0.0.0.0")
//! - `API_PORT`: listen port (default: 3000)
//! - `LOG_LEVEL`: logging level (default: "info")
//! - `API_REQUEST_TIMEOUT_SECONDS`: whole-request timeout (default: 30)
//! - `UPSTREAM_TIMEOUT_SECONDS`: bound on the sheet append (default: 10)
//! - `GOOGLE_SHEET_ID`: target spreadsheet id (required)
//! - `SHEET_NAME`: sheet tab holding the booking log (default: "Sheet1")
//! - `GOOGLE_SERVICE_ACCOUNT_KEY`: service-account credential JSON. Optional
//!   at startup; when absent every submission fails with a configuration
//!   error, but the server still boots and serves the site.
//! - `APP_ENV`: "development" attaches raw error detail to 500 responses

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

use dentbook_sheets::SheetTarget;

/// Configuration for the appointment-intake API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// Whole-request timeout in seconds
    pub request_timeout: u64,

    /// Timeout for the outbound sheet append in seconds
    pub upstream_timeout: u64,

    /// Spreadsheet holding the booking log
    pub sheet_id: String,

    /// Sheet (tab) name inside the spreadsheet
    pub sheet_name: String,

    /// Raw service-account credential JSON, if configured
    pub credentials_json: Option<String>,

    /// Development mode: error responses carry raw upstream detail
    pub development: bool,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `GOOGLE_SHEET_ID` is not set or `API_PORT` is not
    /// a valid port number. A missing credential blob is deliberately not a
    /// startup error; it surfaces per request instead.
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Logging settings
        let log_level = match env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // Timeouts
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);
        let upstream_timeout = env::var("UPSTREAM_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        // Booking sheet settings
        let sheet_id = env::var("GOOGLE_SHEET_ID")
            .wrap_err("GOOGLE_SHEET_ID environment variable must be set")?;
        let sheet_name = env::var("SHEET_NAME").unwrap_or_else(|_| "Sheet1".to_string());
        let credentials_json = env::var("GOOGLE_SERVICE_ACCOUNT_KEY").ok();

        let development = env::var("APP_ENV")
            .map(|v| v == "development")
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            log_level,
            request_timeout,
            upstream_timeout,
            sheet_id,
            sheet_name,
            credentials_json,
            development,
        })
    }

    /// Returns the server address as a string (e.g., "0.0.0.0:3000").
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The append target built from the sheet settings.
    pub fn sheet_target(&self) -> SheetTarget {
        SheetTarget {
            spreadsheet_id: self.sheet_id.clone(),
            sheet_name: self.sheet_name.clone(),
        }
    }
}
