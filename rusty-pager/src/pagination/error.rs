//! Pagination error types.

use thiserror::Error;

/// Errors surfaced by the pagination engine.
#[derive(Debug, Error)]
pub enum PaginationError {
    /// A page size of zero was requested.
    #[error("items per page must be greater than 0")]
    ZeroPageSize,

    /// Sending or editing a message failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Rejected jump or selection target.
///
/// The `Display` text is shown to the acting user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputValidationError {
    #[error("Invalid input. Please enter a valid page number.")]
    NotANumber,

    #[error("Invalid page number. Please enter a number between 1 and {total_pages}.")]
    OutOfRange { total_pages: usize },

    #[error("Cannot determine total pages yet.")]
    TotalUnknown,
}

/// A custom formatter returned an error, panicked, or produced nothing.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FormatterError {
    message: String,
}

impl FormatterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Human-readable failure text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure reported by a [`Transport`](super::transport::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The message or interaction being answered no longer exists.
    #[error("transport target no longer exists")]
    TargetMissing,

    /// The platform rejected or failed the request.
    #[error("transport request failed: {0}")]
    Request(#[from] twilight_http::Error),

    /// The platform response body could not be decoded.
    #[error("transport response could not be decoded: {0}")]
    Decode(#[from] twilight_http::response::DeserializeBodyError),
}

/// Result type for pagination operations.
pub type Result<T> = std::result::Result<T, PaginationError>;
