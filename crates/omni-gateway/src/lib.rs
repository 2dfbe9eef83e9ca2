//! omni-gateway - Concurrent store aggregation for the OmniChain gateway
//!
//! This crate turns three protocol connectors into a unified store view
//! and computes the dashboard KPIs over it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         QueryService                             │
//! │        stores() / store(id) / dashboard_summary() / dashboard()  │
//! └───────────────────────────────┬──────────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────▼──────────────────────────────────┐
//! │                          Aggregator                              │
//! │  - Looks up the store in the StoreDirectory (NotFound here only) │
//! │  - Joins the three connector calls, each under a timeout         │
//! │  - Merges by slot: inventory / orders / robots                   │
//! └───────────────┬───────────────┬───────────────┬──────────────────┘
//!                 │               │               │
//!                 ▼               ▼               ▼
//!  ┌────────────────────┐ ┌──────────────┐ ┌────────────────────┐
//!  │ InventoryConnector │ │OrdersConnector│ │ TelemetryConnector │
//!  │    (REST/JSON)     │ │  (SOAP/XML)  │ │  (gRPC/protobuf)   │
//!  └────────────────────┘ └──────────────┘ └────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use omni_gateway::{Aggregator, GatewayOptions, QueryService};
//!
//! let aggregator = Aggregator::new(directory, inventory, orders, robots, GatewayOptions::default());
//! let queries = QueryService::new(Arc::new(aggregator));
//!
//! let dashboard = queries.dashboard().await;
//! println!("{} pending orders", dashboard.summary.total_orders_pending);
//! ```

mod aggregator;
mod options;
mod query;
mod summary;
pub mod testing;

pub use aggregator::{Aggregator, InventorySource, OrderSource, RobotSource};
pub use options::GatewayOptions;
pub use query::{Dashboard, QueryService};
pub use summary::summarize;

// Re-export core types for convenience
pub use omni_core::{DashboardSummary, GatewayError, GatewayResult, Store, StoreDirectory};
