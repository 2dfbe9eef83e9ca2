//! Shared HTTP plumbing for the REST and SOAP connectors

use std::time::Duration;

use omni_core::ConnectorError;
use reqwest::Client;

/// Connection timeout used by every HTTP connector
const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Build a client with the given whole-request timeout
pub(crate) fn client(request_timeout: Duration) -> Result<Client, ConnectorError> {
    Client::builder()
        .timeout(request_timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(request_timeout))
        .build()
        .map_err(|e| ConnectorError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))
}

/// Classify a reqwest error into the connector taxonomy
pub(crate) fn request_error(err: reqwest::Error) -> ConnectorError {
    if err.is_timeout() {
        ConnectorError::Timeout
    } else if err.is_decode() {
        ConnectorError::Decode(err.to_string())
    } else if err.is_builder() {
        ConnectorError::InvalidRequest(err.to_string())
    } else {
        ConnectorError::Transport(err.to_string())
    }
}

/// Reject blank store ids before any request is made
pub(crate) fn require_store_id(store_id: &str) -> Result<(), ConnectorError> {
    if store_id.trim().is_empty() {
        Err(ConnectorError::InvalidRequest(
            "store id must not be empty".to_string(),
        ))
    } else {
        Ok(())
    }
}
