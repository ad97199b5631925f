//! # Dentbook Core
//!
//! Domain types and rules shared by the appointment-intake service:
//! the appointment request/response models, the form validator, and the
//! error taxonomy the API maps onto HTTP status codes.

pub mod errors;
pub mod models;
pub mod validation;
