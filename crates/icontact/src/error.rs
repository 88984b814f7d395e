//! Error types for the icontact library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, remote API, response parsing and input
//! validation errors.

use std::fmt;
use thiserror::Error;

/// Error code the service reports when a request was rate limited.
pub const RATE_LIMITED_CODE: u16 = 503;

/// The unified error type for icontact operations.
///
/// Callers can match on the variant to tell a network failure from a
/// rejected login, a business-rule rejection or a response the client
/// could not understand.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected login, expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The remote service rejected the request.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The response did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Input validation errors (bad URL, missing required fields).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the HTTP status or remote error code carried by an API error.
    pub fn api_status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status),
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
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the password digest, token and signature.
        let err = err.without_url();
        let message = describe_source_chain(&err);
        if err.is_timeout() {
            TransportError::Timeout { message }
        } else if err.is_connect() {
            TransportError::Connection { message }
        } else {
            TransportError::Http { message }
        }
    }
}

fn describe_source_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The login call was refused (bad API key, secret, username or password).
    #[error("login rejected{}", describe(.code, .message))]
    LoginRejected {
        code: Option<u16>,
        message: Option<String>,
    },

    /// The session token is no longer accepted; the client has dropped it.
    #[error("session expired")]
    SessionExpired,
}

fn describe(code: &Option<u16>, message: &Option<String>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!(" ({code}): {message}"),
        (Some(code), None) => format!(" ({code})"),
        (None, Some(message)) => format!(": {message}"),
        (None, None) => String::new(),
    }
}

/// A request the remote service rejected.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status, or the remote error code when the HTTP exchange succeeded.
    pub status: u16,
    /// Error code from the response envelope (if present).
    pub code: Option<u16>,
    /// Error message from the response envelope (if present).
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, code: Option<u16>, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// Check if the service refused the request because of its rate limit.
    pub fn is_rate_limited(&self) -> bool {
        self.status == RATE_LIMITED_CODE || self.code == Some(RATE_LIMITED_CODE)
    }

    /// Check if this is an authorization failure.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.code == Some(401)
    }
}

/// Unexpected response content.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body was not valid JSON for the expected payload.
    #[error("malformed response body for {operation}: {message}")]
    Body { operation: String, message: String },

    /// A required element was absent.
    #[error("response for {operation} is missing '{field}'")]
    MissingField { operation: String, field: String },

    /// The number of listed entries disagrees with the reported total.
    #[error("response for {operation} reports {expected} entries but lists {actual}")]
    CountMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    /// A timestamp field could not be parsed.
    #[error("invalid timestamp '{value}'")]
    Timestamp { value: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A required field was empty.
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_code_and_message() {
        let err = ApiError::new(400, Some(402), Some("Invalid contact".to_string()));
        assert_eq!(err.to_string(), "HTTP 400 [402]: Invalid contact");
    }

    #[test]
    fn rate_limit_detected_from_status_or_code() {
        assert!(ApiError::new(503, None, None).is_rate_limited());
        assert!(ApiError::new(200, Some(503), None).is_rate_limited());
        assert!(!ApiError::new(500, Some(500), None).is_rate_limited());
    }

    #[test]
    fn login_rejected_display() {
        let err = AuthError::LoginRejected {
            code: Some(401),
            message: Some("Bad password".to_string()),
        };
        assert_eq!(err.to_string(), "login rejected (401): Bad password");
        let bare = AuthError::LoginRejected {
            code: None,
            message: None,
        };
        assert_eq!(bare.to_string(), "login rejected");
    }

    #[test]
    fn api_status_only_for_api_errors() {
        let err: Error = ApiError::new(404, None, None).into();
        assert_eq!(err.api_status(), Some(404));
        let err: Error = AuthError::SessionExpired.into();
        assert_eq!(err.api_status(), None);
    }
}
