//! Error types for the `gateway` crate.
//!
//! A root Error struct holding an error kind tree and an optional source for chaining.

use std::error::Error as StdError;
use std::fmt;

/// Message used when a rejected response carries no readable error field.
pub const GENERIC_REJECTION_MESSAGE: &str = "Request failed, please try again later";

/// Top-level error type for the gateway crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Every way a dispatched request (or the session plumbing around it) can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The service answered 401. The session has already been cleared.
    Unauthorized,
    /// Any other 4xx, with the server's message or a generic one.
    Client { status: u16, message: String },
    /// 5xx responses.
    Server { status: u16, message: String },
    /// No response was received (connection refused, reset, timed out).
    Network,
    /// A success response whose body did not match the expected shape.
    Decode,
    /// Reading or writing the persisted session failed.
    Session(SessionErrorKind),
    /// The HTTP client or a request could not be constructed.
    Builder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorKind {
    Read,
    Write,
    Corrupt,
}

impl Error {
    pub fn new(error_kind: ErrorKind) -> Self {
        Error {
            source: None,
            error_kind,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.error_kind == ErrorKind::Unauthorized
    }

    /// HTTP status attached to this failure, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match &self.error_kind {
            ErrorKind::Unauthorized => Some(401),
            ErrorKind::Client { status, .. } | ErrorKind::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::Unauthorized => write!(f, "Authorization failed"),
            ErrorKind::Client { status, message } => write!(f, "Rejected ({status}): {message}"),
            ErrorKind::Server { status, message } => {
                write!(f, "Server error ({status}): {message}")
            }
            ErrorKind::Network => write!(f, "Network failure"),
            ErrorKind::Decode => write!(f, "Unexpected response body"),
            ErrorKind::Session(kind) => write!(f, "Session storage error: {:?}", kind),
            ErrorKind::Builder => write!(f, "Failed to build HTTP client or request"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Builder errors happen before anything goes on the wire.
        let error_kind = if err.is_builder() {
            ErrorKind::Builder
        } else if err.is_decode() {
            ErrorKind::Decode
        } else {
            ErrorKind::Network
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(err) => err.into(),
            // Middleware failures are raised before the request leaves the client.
            reqwest_middleware::Error::Middleware(err) => Error {
                source: Some(err.into()),
                error_kind: ErrorKind::Builder,
            },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Decode,
        }
    }
}

/// Helper function to create session storage errors.
pub fn session_error(kind: SessionErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Session(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_reports_response_bearing_kinds_only() {
        assert_eq!(Error::new(ErrorKind::Unauthorized).status(), Some(401));
        assert_eq!(
            Error::new(ErrorKind::Client {
                status: 404,
                message: "not found".to_string()
            })
            .status(),
            Some(404)
        );
        assert_eq!(Error::new(ErrorKind::Network).status(), None);
        assert_eq!(Error::new(ErrorKind::Decode).status(), None);
    }

    #[test]
    fn session_error_keeps_message_as_source() {
        let err = session_error(SessionErrorKind::Write, "disk full");
        assert_eq!(err.error_kind, ErrorKind::Session(SessionErrorKind::Write));
        assert_eq!(err.source().map(|s| s.to_string()), Some("disk full".to_string()));
    }
}
