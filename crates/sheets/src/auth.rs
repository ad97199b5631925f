//! OAuth2 access tokens for the Sheets API.
//!
//! A service-account key cannot call the API directly; it signs a short-lived
//! JWT and trades it for an access token at the key's `token_uri`. The token
//! is cached behind a mutex for its lifetime minus a safety margin, giving
//! the process one lazily-initialized credential handle rather than a fresh
//! token exchange per submission.

use chrono::{DateTime, Duration, Utc};
use dentbook_core::errors::{BookingError, BookingResult};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::credentials::ServiceAccountKey;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

// Refresh this long before the upstream expiry to keep an in-flight append
// from racing token expiration.
const EXPIRY_MARGIN_SECONDS: i64 = 60;

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Process-scoped access-token cache. Initialized on first use, never torn
/// down; credentials are immutable for the process lifetime.
pub struct TokenProvider {
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new() -> Self {
        Self {
            cached: Mutex::new(None),
        }
    }

    /// Returns a valid access token, exchanging a signed JWT for a new one
    /// when the cache is empty or about to expire.
    pub async fn access_token(
        &self,
        http: &reqwest::Client,
        key: &ServiceAccountKey,
    ) -> BookingResult<String> {
        let mut cached = self.cached.lock().await;

        if let Some(entry) = cached.as_ref() {
            if entry.expires_at > Utc::now() {
                return Ok(entry.token.clone());
            }
        }

        let token_response = self.fetch_token(http, key).await?;
        let expires_at = Utc::now()
            + Duration::seconds((token_response.expires_in - EXPIRY_MARGIN_SECONDS).max(0));

        debug!(expires_in = token_response.expires_in, "obtained sheets access token");

        let token = token_response.access_token.clone();
        *cached = Some(CachedToken {
            token: token_response.access_token,
            expires_at,
        });

        Ok(token)
    }

    async fn fetch_token(
        &self,
        http: &reqwest::Client,
        key: &ServiceAccountKey,
    ) -> BookingResult<TokenResponse> {
        let assertion = sign_assertion(key)?;

        let response = http
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
            .send()
            .await
            .map_err(|err| BookingError::Upstream(format!("token request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::FORBIDDEN
                || status == reqwest::StatusCode::UNAUTHORIZED
            {
                return Err(BookingError::UpstreamAccess(format!(
                    "token endpoint returned {status}: {body}"
                )));
            }
            return Err(BookingError::Upstream(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|err| BookingError::Upstream(format!("malformed token response: {err}")))
    }
}

impl Default for TokenProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Signs the RS256 JWT the token endpoint expects.
///
/// An unparseable private key is a configuration problem, not an upstream
/// one: the credential blob itself is bad.
fn sign_assertion(key: &ServiceAccountKey) -> BookingResult<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        iss: &key.client_email,
        scope: SHEETS_SCOPE,
        aud: &key.token_uri,
        iat: now,
        exp: now + 3600,
    };

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|err| {
        BookingError::Configuration(format!(
            "service-account private key is not valid RSA PEM: {err}"
        ))
    })?;

    encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|err| BookingError::Configuration(format!("failed to sign token request: {err}")))
}
