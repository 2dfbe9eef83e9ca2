//! Procurement order models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a procurement order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Submitted, not yet acknowledged by the supplier
    #[default]
    Pending,
    /// Accepted by the supplier
    Confirmed,
    /// In transit
    Shipped,
    /// Received by the store
    Delivered,
    /// Withdrawn
    Cancelled,
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Unknown order status: '{}'", s)),
        }
    }
}

/// A procurement order placed with a supplier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier
    pub id: String,
    /// Supplying organisation
    pub supplier_id: String,
    /// Current lifecycle state
    pub status: OrderStatus,
    /// Order total in cents
    pub total_price_cents: u64,
    /// Number of line items
    pub item_count: u32,
    /// Date the order was placed
    pub order_date: NaiveDate,
    /// Expected arrival, never before `order_date`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub estimated_delivery: Option<NaiveDate>,
}
