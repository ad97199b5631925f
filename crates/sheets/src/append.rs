//! The append call against the Sheets v4 `values:append` endpoint.

use dentbook_core::errors::{BookingError, BookingResult};
use reqwest::StatusCode;
use serde_json::json;
use tracing::info;

use crate::{AppointmentRow, SheetTarget};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Appends one row after the existing data in the target range.
///
/// `INSERT_ROWS` makes the API insert a fresh row rather than overwrite, and
/// `RAW` stores the cell values as-is with no formula interpretation.
pub async fn append_row(
    http: &reqwest::Client,
    token: &str,
    target: &SheetTarget,
    row: AppointmentRow,
) -> BookingResult<()> {
    let url = format!(
        "{SHEETS_API_BASE}/{}/values/{}:append",
        target.spreadsheet_id,
        target.range()
    );

    let response = http
        .post(&url)
        .bearer_auth(token)
        .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
        .json(&json!({ "values": [row.into_cells()] }))
        .send()
        .await
        .map_err(|err| classify_failure(err.status(), &err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(classify_failure(Some(status), &body));
    }

    info!(range = %target.range(), "appointment row appended");
    Ok(())
}

/// Classifies an upstream failure, preferring the HTTP status over the error
/// text. The substring fallback only matters for transport-level errors that
/// carry no status; upstream message wording is not a stable interface.
pub fn classify_failure(status: Option<StatusCode>, detail: &str) -> BookingError {
    match status {
        Some(status) if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED => {
            BookingError::UpstreamAccess(detail.to_string())
        }
        Some(status) => BookingError::Upstream(format!("sheets append returned {status}: {detail}")),
        None if detail.contains("Permission denied") || detail.contains("403") => {
            BookingError::UpstreamAccess(detail.to_string())
        }
        None => BookingError::Upstream(detail.to_string()),
    }
}
