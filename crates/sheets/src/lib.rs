//! # Dentbook Sheets
//!
//! The external-store layer: appends accepted appointment requests as rows
//! of a shared Google Sheet. Holds the only code that touches the
//! service-account credential, and the only outbound network calls.

pub mod append;
pub mod auth;
pub mod credentials;

pub mod mock;

use async_trait::async_trait;
use dentbook_core::errors::BookingResult;

use crate::auth::TokenProvider;
use crate::credentials::ServiceAccountKey;

/// One fixed-width row of the booking sheet, in column order A through F.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRow {
    pub timestamp: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: String,
    pub message: String,
}

impl AppointmentRow {
    pub fn into_cells(self) -> [String; 6] {
        [
            self.timestamp,
            self.name,
            self.phone,
            self.email,
            self.date,
            self.message,
        ]
    }
}

/// Where rows land: spreadsheet id plus the sheet (tab) the clinic watches.
#[derive(Debug, Clone)]
pub struct SheetTarget {
    pub spreadsheet_id: String,
    pub sheet_name: String,
}

impl SheetTarget {
    /// The six-column append range, e.g. `Sheet1!A:F`.
    pub fn range(&self) -> String {
        format!("{}!A:F", self.sheet_name)
    }
}

/// Destination for accepted appointment rows.
///
/// Append is fire-and-forget: no read-back, no idempotency key, no
/// deduplication. A client that retries a submission appends two rows.
#[async_trait]
pub trait AppointmentSink: Send + Sync {
    async fn append(&self, row: AppointmentRow) -> BookingResult<()>;
}

/// Live sink backed by the Google Sheets v4 API.
///
/// The raw credential blob is kept unparsed so a misconfigured deployment
/// still boots; parsing happens per append and failures surface as
/// configuration errors on that request. The OAuth access token is cached
/// process-wide inside [`TokenProvider`].
pub struct SheetsAppender {
    credentials_json: Option<String>,
    target: SheetTarget,
    http: reqwest::Client,
    tokens: TokenProvider,
}

impl SheetsAppender {
    pub fn new(credentials_json: Option<String>, target: SheetTarget) -> Self {
        Self {
            credentials_json,
            target,
            http: reqwest::Client::new(),
            tokens: TokenProvider::new(),
        }
    }
}

#[async_trait]
impl AppointmentSink for SheetsAppender {
    async fn append(&self, row: AppointmentRow) -> BookingResult<()> {
        let key = ServiceAccountKey::load(self.credentials_json.as_deref())?;
        let token = self.tokens.access_token(&self.http, &key).await?;
        append::append_row(&self.http, &token, &self.target, row).await
    }
}
