//! TOML configuration for the daemon
//!
//! Every section is optional; missing values fall back to the local demo
//! backends. The `[[stores]]` array is the store directory.

use omni_connectors::ConnectorsConfig;
use omni_core::{ConfigError, StoreDirectory, StoreEntry};
use omni_gateway::GatewayOptions;
use serde::Deserialize;

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    8003
}

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DaemonConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gateway: GatewayOptions,
    #[serde(default)]
    pub connectors: ConnectorsConfig,
    /// Store directory, in display order
    #[serde(default)]
    pub stores: Vec<StoreEntry>,
}

impl DaemonConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Built-in two-store directory against the localhost demo backends
    pub fn demo() -> Self {
        Self {
            stores: vec![
                StoreEntry {
                    id: "STORE-PARIS-01".to_string(),
                    name: "OmniChain Paris - Le Marais".to_string(),
                    city: "Paris".to_string(),
                    country: "France".to_string(),
                    robots: vec!["ROBOT-P01-A".to_string(), "ROBOT-P01-B".to_string()],
                },
                StoreEntry {
                    id: "STORE-BERLIN-02".to_string(),
                    name: "OmniChain Berlin - Mitte".to_string(),
                    city: "Berlin".to_string(),
                    country: "Germany".to_string(),
                    robots: vec!["ROBOT-B02-A".to_string()],
                },
            ],
            ..Default::default()
        }
    }

    /// Build the store directory from `[[stores]]`
    pub fn directory(&self) -> Result<StoreDirectory, ConfigError> {
        StoreDirectory::from_entries(self.stores.clone())
    }
}
