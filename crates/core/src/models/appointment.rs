use serde::{Deserialize, Serialize};

/// An appointment request exactly as submitted by the website form.
///
/// There is no identity and no lifecycle: the request is validated, stamped
/// with a submission timestamp, and handed off to the booking sheet once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Preferred appointment date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAppointmentResponse {
    pub success: bool,
    pub message: String,
    pub data: AcceptedAppointment,
}

/// Echo of the accepted submission. Purely informational; the timestamp is a
/// human-readable string, not a durable resource identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedAppointment {
    pub name: String,
    pub email: String,
    pub date: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub success: bool,
    pub error: String,
    /// Raw upstream detail, attached only when the server runs in
    /// development mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
