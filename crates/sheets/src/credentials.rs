//! Service-account credential loading.
//!
//! The credential arrives as one JSON-encoded configuration value
//! (`GOOGLE_SERVICE_ACCOUNT_KEY`). Everything that can go wrong with it is
//! classified here as a configuration error, so the API layer has a single
//! place that means "server misconfigured".

use dentbook_core::errors::{BookingError, BookingResult};
use serde::Deserialize;

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// The fields of a Google service-account key this service actually uses.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: String,
    pub client_email: String,
    /// PKCS#8 RSA private key in PEM form.
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Loads the key from the raw configuration value, if set.
    pub fn load(raw: Option<&str>) -> BookingResult<Self> {
        let raw = raw.ok_or_else(|| {
            BookingError::Configuration(
                "GOOGLE_SERVICE_ACCOUNT_KEY environment variable not set".to_string(),
            )
        })?;
        Self::parse(raw)
    }

    /// Parses and type-checks a JSON credential blob.
    pub fn parse(raw: &str) -> BookingResult<Self> {
        let key: Self = serde_json::from_str(raw).map_err(|err| {
            BookingError::Configuration(format!(
                "GOOGLE_SERVICE_ACCOUNT_KEY is not a valid service-account JSON object: {err}"
            ))
        })?;

        if key.key_type != "service_account" {
            return Err(BookingError::Configuration(
                "Invalid Google Service Account credentials".to_string(),
            ));
        }

        Ok(key)
    }
}
