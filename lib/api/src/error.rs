use thiserror::Error;

/// Outcome categories surfaced to API callers.
///
/// `Internal` never carries detail; the cause is logged where it happens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Server error")]
    Internal,
}

pub type Result<T> = std::result::Result<T, ApiError>;
