//! Error types for workday-engine operations.

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkdayError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Holidays not initialized: {0}")]
    Uninitialized(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Holiday feed error: {0}")]
    HolidayFeed(String),
}

/// Machine-readable tag for a [`WorkdayError`].
///
/// Callers branch on the kind rather than on the variant payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidParameters,
    Uninitialized,
    InternalError,
    HolidayFeed,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidParameters => "InvalidParameters",
            ErrorKind::Uninitialized => "Uninitialized",
            ErrorKind::InternalError => "InternalError",
            ErrorKind::HolidayFeed => "HolidayFeed",
        }
    }

    /// Whether the error was caused by the caller's input rather than by the service.
    pub fn is_client_error(self) -> bool {
        matches!(self, ErrorKind::InvalidParameters)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WorkdayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkdayError::InvalidParameters(_) => ErrorKind::InvalidParameters,
            WorkdayError::Uninitialized(_) => ErrorKind::Uninitialized,
            WorkdayError::Internal(_) => ErrorKind::InternalError,
            WorkdayError::HolidayFeed(_) => ErrorKind::HolidayFeed,
        }
    }

    /// The message without the kind prefix added by `Display`.
    pub fn message(&self) -> &str {
        match self {
            WorkdayError::InvalidParameters(msg)
            | WorkdayError::Uninitialized(msg)
            | WorkdayError::Internal(msg)
            | WorkdayError::HolidayFeed(msg) => msg,
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkdayError>;
