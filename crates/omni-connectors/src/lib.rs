//! omni-connectors - Backend connectors for the OmniChain gateway
//!
//! One connector per backend protocol, each implementing
//! [`omni_core::Connector`]:
//!
//! | Connector | Backend | Wire format | Slot |
//! |---|---|---|---|
//! | [`InventoryConnector`] | partner marketplace | REST / JSON | `inventory` |
//! | [`OrdersConnector`] | procurement service | SOAP 1.1 / XML | `orders` |
//! | [`TelemetryConnector`] | warehouse automation | gRPC / protobuf | `robots` |
//!
//! # Usage
//!
//! ```rust,ignore
//! use omni_connectors::{InventoryConnector, InventoryConnectorConfig};
//! use omni_core::Connector;
//!
//! let inventory = InventoryConnector::new(&InventoryConnectorConfig::default())?;
//!
//! // Never fails: backend errors degrade to an empty Vec
//! let items = inventory.fetch("STORE-PARIS-01").await;
//! ```

pub mod config;
mod http;
mod inventory;
mod orders;
pub mod proto;
mod telemetry;
pub mod testing;
mod xml;

pub use config::{
    ConnectorsConfig, InventoryConnectorConfig, OrdersConnectorConfig, TelemetryConnectorConfig,
};
pub use inventory::InventoryConnector;
pub use orders::{OrdersConnector, PLACEHOLDER_UNIT_PRICE_CENTS};
pub use telemetry::{robot_status, TelemetryConnector};

// Re-export core types for convenience
pub use omni_core::{Connector, ConnectorError, ConnectorResult};
