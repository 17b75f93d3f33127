// ================================================================
// File: qureplus-common/src/error.rs
// ================================================================

use thiserror::Error;

use crate::models::form::FieldErrors;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found error: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The hosted backend is not configured, or could not be reached.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The hosted backend answered with a non-success status.
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Unsupported image type: {0}")]
    UnsupportedImage(String),

    #[error("Image too large: {0} bytes")]
    ImageTooLarge(usize),

    /// Every intake slot is taken; the visitor should retry later.
    #[error("Too many active intake sessions (limit {0})")]
    SessionLimit(usize),

    #[error("Invalid intake transition: {0}")]
    InvalidState(String),

    #[error("Operation already in progress: {0}")]
    Busy(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Uuid error: {0}")]
    Uuid(#[from] uuid::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Maps transport failures to `BackendUnavailable`, everything else to `Http`.
    pub fn from_backend_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Error::BackendUnavailable(err.to_string())
        } else {
            Error::Http(err)
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Parse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Parse(s.to_string())
    }
}

impl From<chrono::format::ParseError> for Error {
    fn from(err: chrono::format::ParseError) -> Self {
        Error::Parse(err.to_string())
    }
}
