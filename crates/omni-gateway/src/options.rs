//! Gateway tuning options

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Floor for the per-connector timeout; a zero bound would empty every slot
const MIN_CONNECTOR_TIMEOUT_MS: u64 = 50;

/// Aggregation limits, read from the `[gateway]` config table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOptions {
    /// Upper bound on a single connector call, in milliseconds
    #[serde(default = "default_connector_timeout_ms")]
    pub connector_timeout_ms: u64,
    /// Store aggregations allowed in flight during a listing
    #[serde(default = "default_max_concurrent_stores")]
    pub max_concurrent_stores: usize,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            connector_timeout_ms: default_connector_timeout_ms(),
            max_concurrent_stores: default_max_concurrent_stores(),
        }
    }
}

impl GatewayOptions {
    /// Per-connector timeout, never below `MIN_CONNECTOR_TIMEOUT_MS`
    pub fn connector_timeout(&self) -> Duration {
        Duration::from_millis(self.connector_timeout_ms.max(MIN_CONNECTOR_TIMEOUT_MS))
    }

    /// Listing concurrency, never below one
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_stores.max(1)
    }
}

fn default_connector_timeout_ms() -> u64 {
    2000
}

fn default_max_concurrent_stores() -> usize {
    4
}
