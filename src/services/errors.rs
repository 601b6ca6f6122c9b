use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Submitted fields were missing or malformed; user-correctable.
    #[error("{0}")]
    Validation(String),
    /// A submitted value failed to parse (dates, coordinates).
    #[error("{0}")]
    Parse(String),
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
