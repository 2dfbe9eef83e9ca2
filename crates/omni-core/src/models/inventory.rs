//! Inventory models

use serde::{Deserialize, Serialize};

/// Quantity strictly below this value raises a low-stock alert
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// A product held in a store's inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Stock keeping unit, unique within a store
    pub sku: String,
    /// Product display name
    pub name: String,
    /// Product category (e.g., "jackets")
    pub category: String,
    /// Units on hand
    pub quantity: u32,
    /// Unit price in cents
    pub price_cents: u64,
}

impl InventoryItem {
    /// Whether this item is below the low-stock threshold
    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }
}
