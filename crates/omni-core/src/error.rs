//! Error taxonomy for the gateway
//!
//! Only `GatewayError` ever reaches a caller. `ConnectorError` is raised and
//! recovered inside a connector; `ConfigError` is a startup concern.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type for fallible connector calls
pub type ConnectorResult<T> = Result<T, ConnectorError>;

/// Result type for query surface operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failures that can occur while talking to one backend.
///
/// These never cross the connector boundary: `Connector::fetch` records
/// them as a diagnostic and degrades to an empty slot.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Connection refused, reset, DNS failure, ...
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend did not answer in time
    #[error("Backend timed out")]
    Timeout,

    /// Malformed envelope or unexpected status from the backend
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The backend answered with an explicit fault
    #[error("Remote fault {code}: {message}")]
    RemoteFault {
        /// Fault code reported by the backend
        code: String,
        /// Human-readable fault description
        message: String,
    },

    /// Payload was well-formed but did not match the expected schema
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request was rejected before it left the connector
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ConnectorError {
    /// Short stable label for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            ConnectorError::Transport(_) => "transport",
            ConnectorError::Timeout => "timeout",
            ConnectorError::Protocol(_) => "protocol",
            ConnectorError::RemoteFault { .. } => "remote_fault",
            ConnectorError::Decode(_) => "decode",
            ConnectorError::InvalidRequest(_) => "invalid_request",
        }
    }
}

impl From<ValidationError> for ConnectorError {
    fn from(err: ValidationError) -> Self {
        ConnectorError::Decode(err.to_string())
    }
}

/// Errors surfaced by the query surface
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The requested store is not in the directory
    #[error("Store not found: {0}")]
    StoreNotFound(String),
}

/// Errors raised while loading configuration or building the directory
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Configuration parsed but is inconsistent
    #[error("Invalid config: {0}")]
    Invalid(String),
}
