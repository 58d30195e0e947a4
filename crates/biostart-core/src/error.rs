//! Error types for the BioStart backend core.
//!
//! This module provides a unified error type with explicit variants for
//! input validation, authentication, upstream transport, and unexpected
//! upstream response shapes. Handlers map each variant to a fixed HTTP
//! status at the boundary; none propagate as uncaught faults.

use std::fmt;
use thiserror::Error;

/// The unified error type for backend operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed required input. Rejected before any upstream
    /// call is attempted.
    #[error("validation error: {0}")]
    Validation(String),

    /// Authentication errors (bad credentials, duplicate registration).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The backing store or generative-text service is unreachable or
    /// answered with a non-success status.
    #[error("upstream unavailable: {0}")]
    Upstream(#[from] UpstreamError),

    /// An upstream response arrived but did not have the expected shape.
    #[error("unexpected upstream response: {0}")]
    InvalidResponse(String),

    /// A referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password pair matched no record.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration attempted with an email that is already registered.
    #[error("'{email}' is already registered")]
    DuplicateRegistration { email: String },
}

/// Transport and status errors from an upstream service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// The service answered with a non-success status.
    #[error("{0}")]
    Status(StatusError),
}

/// A non-success HTTP status from an upstream service, with whatever error
/// body the service returned.
#[derive(Debug)]
pub struct StatusError {
    /// HTTP status code.
    pub status: u16,
    /// Error detail from the server body, if any.
    pub detail: Option<String>,
}

impl StatusError {
    /// Create a new status error.
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self { status, detail }
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for StatusError {}

impl UpstreamError {
    /// Convenience constructor for a non-success status.
    pub fn status(status: u16, detail: Option<String>) -> Self {
        UpstreamError::Status(StatusError::new(status, detail))
    }
}

/// Failure to decode a string-embedded JSON field.
///
/// Deliberately not convertible into [`Error`]: the only consumer is the
/// tolerant boundary in [`codec::decode_or_default`](crate::codec::decode_or_default),
/// which downgrades it to the type's default value.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The stored field exists but is not a JSON string.
    #[error("field '{field}' is not a JSON string")]
    NotAString { field: &'static str },

    /// The stored string is not valid JSON.
    #[error("field '{field}' holds malformed JSON: {source}")]
    Malformed {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
