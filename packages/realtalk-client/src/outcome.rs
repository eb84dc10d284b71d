//! Operation outcomes.
//!
//! Every operation returns an [`Outcome`]: either the decoded payload or the
//! error code and message reported for the call. There is no other failure
//! channel.

use thiserror::Error;

use crate::types::{ChatRoom, Message};

/// Error code reported when no usable response was obtained.
pub const REQUEST_FAILED: &str = "REQUEST FAILED";

/// Error code for a `since` time that cannot be sent as a tick cursor.
pub const ERROR_INVALID_TIMESTAMP: &str = "ERROR_INVALID_TIMESTAMP";
pub const ERROR_MESSAGE_PARSING_ERROR: &str = "ERROR_MESSAGE_PARSING_ERROR";

/// Placeholder returned by [`Outcome::error_code`] on success.
pub const NO_ERROR_CODE: &str = "NO ERROR CODE";

/// Placeholder returned by [`Outcome::error_message`] on success.
pub const NO_ERROR_MESSAGE: &str = "NO ERROR MESSAGE";

/// Error code and message describing a failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ServiceError {
    pub code: String,
    pub message: String,
}

impl ServiceError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Generic failure for transport errors and undecodable responses.
    pub fn request_failed() -> Self {
        Self::new(REQUEST_FAILED, REQUEST_FAILED)
    }

    pub fn invalid_timestamp() -> Self {
        Self::new(ERROR_INVALID_TIMESTAMP, ERROR_MESSAGE_PARSING_ERROR)
    }

    /// Whether this is the generic failure rather than a server-reported one.
    pub fn is_request_failed(&self) -> bool {
        self.code == REQUEST_FAILED && self.message == REQUEST_FAILED
    }
}

/// Result of a single operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(ServiceError),
}

/// Outcome of an operation with no payload.
pub type RequestOutcome = Outcome<()>;

/// Outcome of a chat log pull, in server order.
pub type MessagesOutcome = Outcome<Vec<Message>>;

/// Outcome of a room listing, in server order.
pub type RoomsOutcome = Outcome<Vec<ChatRoom>>;

impl<T> Outcome<T> {
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Outcome::Failure(ServiceError::new(code, message))
    }

    pub fn request_failed() -> Self {
        Outcome::Failure(ServiceError::request_failed())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Payload, present only on success.
    pub fn payload(&self) -> Option<&T> {
        match self {
            Outcome::Success(payload) => Some(payload),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ServiceError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    /// Error code, or [`NO_ERROR_CODE`] on success.
    pub fn error_code(&self) -> &str {
        self.error().map_or(NO_ERROR_CODE, |e| e.code.as_str())
    }

    /// Error message, or [`NO_ERROR_MESSAGE`] on success.
    pub fn error_message(&self) -> &str {
        self.error().map_or(NO_ERROR_MESSAGE, |e| e.message.as_str())
    }

    pub fn into_result(self) -> Result<T, ServiceError> {
        match self {
            Outcome::Success(payload) => Ok(payload),
            Outcome::Failure(error) => Err(error),
        }
    }
}

impl<T> From<Result<T, ServiceError>> for Outcome<T> {
    fn from(result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(payload) => Outcome::Success(payload),
            Err(error) => Outcome::Failure(error),
        }
    }
}
