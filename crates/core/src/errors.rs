use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream access denied: {0}")]
    UpstreamAccess(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

pub type BookingResult<T> = Result<T, BookingError>;
