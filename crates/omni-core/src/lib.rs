//! omni-core - Canonical entities and contracts for the OmniChain gateway
//!
//! This crate provides the protocol-independent data model that every
//! connector maps its backend payloads into, the read-only store
//! directory, and the `Connector` trait the aggregator fans out over.
//! It performs no I/O of its own.

pub mod connector;
pub mod directory;
pub mod error;
pub mod models;
pub mod validation;

pub use connector::Connector;
pub use directory::{StoreDirectory, StoreEntry};
pub use error::{ConfigError, ConnectorError, ConnectorResult, GatewayError, GatewayResult};
pub use models::*;
