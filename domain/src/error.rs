//! Error types for the `domain` layer.
use gateway::error::{Error as GatewayError, ErrorKind as GatewayErrorKind};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums. The `source` field holds the original error that caused the domain error.
/// Gateway errors are translated here so views depend on `domain` only, and
/// `user_message` gives them the text to render.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    /// Caller input rejected before anything was sent.
    Validation(ValidationErrorKind),
    /// A protected operation was attempted with no session; nothing was sent.
    Unauthenticated,
    /// The service rejected the request or could not be reached.
    External(ExternalErrorKind),
    Internal(InternalErrorKind),
}

/// Local input checks. None of these dispatch a request.
#[derive(Debug, PartialEq)]
pub enum ValidationErrorKind {
    MissingField(&'static str),
    InvalidEmail,
    PasswordMismatch,
    OutOfRange(&'static str),
    EmptyUpdate,
}

#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    /// The session was rejected and has been cleared; navigation is already
    /// heading to the login view.
    Unauthorized,
    /// A 4xx other than 401, with the message to show verbatim.
    Rejected { status: u16, message: String },
    Server { status: u16, message: String },
    Network,
}

#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Decode,
    Session,
    Other(String),
}

impl Error {
    pub fn validation(kind: ValidationErrorKind) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Validation(kind),
        }
    }

    pub fn internal(message: &str) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(message.to_string())),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.error_kind == DomainErrorKind::External(ExternalErrorKind::Unauthorized)
    }

    pub fn unauthenticated() -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Unauthenticated,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.error_kind, DomainErrorKind::Validation(_))
    }

    /// The text a view shows for this failure.
    pub fn user_message(&self) -> String {
        match &self.error_kind {
            DomainErrorKind::Validation(kind) => match kind {
                ValidationErrorKind::MissingField(field) => format!("{field} is required"),
                ValidationErrorKind::InvalidEmail => {
                    "Please enter a valid email address".to_string()
                }
                ValidationErrorKind::PasswordMismatch => "Passwords do not match".to_string(),
                ValidationErrorKind::OutOfRange(field) => format!("{field} is out of range"),
                ValidationErrorKind::EmptyUpdate => "Nothing to update".to_string(),
            },
            DomainErrorKind::Unauthenticated => "Please log in to continue".to_string(),
            DomainErrorKind::External(kind) => match kind {
                ExternalErrorKind::Unauthorized => {
                    "Your session has expired, please log in again".to_string()
                }
                ExternalErrorKind::Rejected { message, .. }
                | ExternalErrorKind::Server { message, .. } => message.clone(),
                ExternalErrorKind::Network => {
                    "Unable to reach the server, please check your connection and try again"
                        .to_string()
                }
            },
            DomainErrorKind::Internal(_) => "Something went wrong, please try again later".to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `gateway` layer to the `domain` layer.
impl From<GatewayError> for Error {
    fn from(err: GatewayError) -> Self {
        let error_kind = match &err.error_kind {
            GatewayErrorKind::Unauthorized => DomainErrorKind::External(ExternalErrorKind::Unauthorized),
            GatewayErrorKind::Client { status, message } => {
                DomainErrorKind::External(ExternalErrorKind::Rejected {
                    status: *status,
                    message: message.clone(),
                })
            }
            GatewayErrorKind::Server { status, message } => {
                DomainErrorKind::External(ExternalErrorKind::Server {
                    status: *status,
                    message: message.clone(),
                })
            }
            GatewayErrorKind::Network => DomainErrorKind::External(ExternalErrorKind::Network),
            GatewayErrorKind::Decode => DomainErrorKind::Internal(InternalErrorKind::Decode),
            GatewayErrorKind::Session(_) => DomainErrorKind::Internal(InternalErrorKind::Session),
            GatewayErrorKind::Builder => {
                DomainErrorKind::Internal(InternalErrorKind::Other(err.to_string()))
            }
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_rejection_message_is_shown_verbatim() {
        let err = Error::from(GatewayError::new(GatewayErrorKind::Client {
            status: 400,
            message: "Username already exists".to_string(),
        }));

        assert_eq!(err.user_message(), "Username already exists");
        assert!(err.source().is_some());
    }

    #[test]
    fn network_failure_prompts_a_retry() {
        let err = Error::from(GatewayError::new(GatewayErrorKind::Network));
        assert!(err.user_message().contains("try again"));
    }

    #[test]
    fn unauthorized_is_recognised() {
        let err = Error::from(GatewayError::new(GatewayErrorKind::Unauthorized));
        assert!(err.is_unauthorized());
        assert!(!err.is_validation());
    }

    #[test]
    fn validation_messages_name_the_field() {
        let err = Error::validation(ValidationErrorKind::MissingField("exercise_type"));
        assert_eq!(err.user_message(), "exercise_type is required");
        assert!(err.is_validation());
    }
}
