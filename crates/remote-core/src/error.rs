//! Error types for Panel remote API operations.
//!
//! This module provides a unified error type with explicit variants for
//! transport, remote (Panel-reported), decoding, credential and input
//! validation failures.

use std::fmt;
use thiserror::Error;

/// Code used when the Panel returns an error status without an error body.
pub const MISSING_RESPONSE_CODE: &str = "_MissingResponseCode";

/// The unified error type for remote API operations.
///
/// Callers are expected to match on the variant rather than inspect the
/// rendered message, in particular to tell [`Error::InvalidCredentials`]
/// apart from a generic [`Error::Remote`].
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be dispatched, or the context was cancelled.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The Panel answered with a non-2xx status.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The SFTP credentials are not valid for any server on this node.
    #[error("the credentials provided were invalid")]
    InvalidCredentials,

    /// Input validation errors (bad URL, zero page size).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// An underlying error annotated with what was being attempted.
    #[error("{context}: {source}")]
    Context {
        context: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error with a short description of the failed operation.
    pub fn context(self, context: &'static str) -> Self {
        Error::Context {
            context,
            source: Box::new(self),
        }
    }

    /// Returns true if this is the SFTP invalid-credentials outcome.
    pub fn is_invalid_credentials(&self) -> bool {
        match self {
            Error::InvalidCredentials => true,
            Error::Context { source, .. } => source.is_invalid_credentials(),
            _ => false,
        }
    }

    /// Returns the Panel-reported error, if this error carries one.
    pub fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            Error::Remote(e) => Some(e),
            Error::Context { source, .. } => source.as_remote(),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// The execution context was cancelled before the response arrived.
    #[error("request cancelled")]
    Cancelled,
}

/// An error reported by the Panel in its JSON error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// HTTP status code.
    pub status: u16,
    /// Panel error code, or [`MISSING_RESPONSE_CODE`].
    pub code: String,
    /// Human-readable detail from the Panel.
    pub detail: String,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error response from Panel: {}: {} (HTTP/{})",
            self.code, self.detail, self.status
        )
    }
}

impl std::error::Error for RemoteError {}

impl RemoteError {
    /// Create a new remote error.
    pub fn new(status: u16, code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            detail: detail.into(),
        }
    }

    /// Error used when the Panel returned no usable error body.
    pub fn missing(status: u16) -> Self {
        Self::new(
            status,
            MISSING_RESPONSE_CODE,
            "No error response returned from API endpoint.",
        )
    }

    /// Check if the status is in the 4xx range.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the Panel is throttling this node.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// The response body could not be decoded.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(DecodeError::from(err))
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid Panel URL format.
    #[error("invalid Panel URL '{value}': {reason}")]
    PanelUrl { value: String, reason: String },

    /// Page size must be at least one.
    #[error("page size must be greater than zero")]
    PageSize,

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
