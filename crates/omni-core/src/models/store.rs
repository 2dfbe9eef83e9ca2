//! Aggregated store and dashboard models

use serde::{Deserialize, Serialize};

use super::{InventoryItem, Order, RobotTelemetry};

/// A store assembled from the directory and the three backend slots.
///
/// A failed backend contributes an empty slot; the store itself is
/// always present when its directory entry exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    /// Store identifier
    pub id: String,
    /// Display name
    pub name: String,
    pub city: String,
    pub country: String,
    /// Inventory slot (resource-oriented backend)
    pub inventory: Vec<InventoryItem>,
    /// Orders slot (document-RPC backend)
    pub orders: Vec<Order>,
    /// Robots slot (binary-RPC backend)
    pub robots: Vec<RobotTelemetry>,
}

/// Cross-store KPIs, recomputed on every query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Number of stores in the snapshot
    pub total_stores: usize,
    /// Inventory items across all stores
    pub total_skus: usize,
    /// Orders in PENDING state
    pub total_orders_pending: usize,
    /// Robots in any state other than IDLE
    pub total_robots_active: usize,
    /// Items below the low-stock threshold
    pub low_stock_alerts: Vec<InventoryItem>,
}
