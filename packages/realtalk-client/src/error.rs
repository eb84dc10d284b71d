//! Error types for the RealTalk client.
//!
//! None of these cross the operation boundary: operations always return an
//! [`Outcome`](crate::Outcome). They surface only from client setup and from
//! [`Transport`](crate::Transport) implementations.

use thiserror::Error;

/// Result type for client setup.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client setup errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error (invalid environment value)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP transport could not be built
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failure to obtain a JSON document from the service.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response without a JSON document
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body is not a JSON document
    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),
}
