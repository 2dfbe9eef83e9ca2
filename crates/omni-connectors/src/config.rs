//! Connector configuration
//!
//! Deserialized from the `[connectors.*]` tables of the daemon config.
//! Every field has a default pointing at the local demo backends.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// All connector settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectorsConfig {
    #[serde(default)]
    pub inventory: InventoryConnectorConfig,
    #[serde(default)]
    pub orders: OrdersConnectorConfig,
    #[serde(default)]
    pub telemetry: TelemetryConnectorConfig,
}

/// Partner marketplace (REST) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConnectorConfig {
    /// Base URL of the marketplace API
    #[serde(default = "default_inventory_url")]
    pub base_url: String,
    /// Whole-request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for InventoryConnectorConfig {
    fn default() -> Self {
        Self {
            base_url: default_inventory_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Procurement service (SOAP) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersConnectorConfig {
    /// SOAP endpoint URL
    #[serde(default = "default_orders_url")]
    pub endpoint: String,
    /// Whole-request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for OrdersConnectorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_orders_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Warehouse automation (gRPC) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConnectorConfig {
    /// gRPC endpoint URI (e.g., "http://localhost:50051")
    #[serde(default = "default_telemetry_url")]
    pub endpoint: String,
    /// TCP connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Per-call timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for TelemetryConnectorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_telemetry_url(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl TelemetryConnectorConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_inventory_url() -> String {
    "http://localhost:8002".to_string()
}

fn default_orders_url() -> String {
    "http://localhost:8001/".to_string()
}

fn default_telemetry_url() -> String {
    "http://localhost:50051".to_string()
}

fn default_request_timeout_ms() -> u64 {
    1500
}

fn default_connect_timeout_ms() -> u64 {
    500
}
