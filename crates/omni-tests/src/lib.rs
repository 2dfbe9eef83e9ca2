//! Integration tests for the OmniChain gateway
//!
//! This crate contains end-to-end tests that exercise the full stack over
//! real sockets:
//! - HTTP API layer
//! - Aggregator and summary engine
//! - REST, SOAP and gRPC connectors against in-process backends
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p omni-tests
//! ```
//!
//! # Test Structure
//!
//! - `gateway_e2e_test.rs` - Store and dashboard queries with healthy,
//!   failing and slow backends

// This crate only contains tests, no library code
