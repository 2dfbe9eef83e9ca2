//! Invariant checks applied while building canonical entities
//!
//! Connectors read signed or loosely-typed wire values; these helpers turn
//! them into the canonical unsigned types and repair the two invariants
//! that can be fixed without discarding a whole response (duplicate SKUs
//! and inverted delivery windows).

use std::collections::HashSet;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

use crate::models::InventoryItem;

/// A wire value that cannot become a canonical field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: i64 },

    #[error("{field} is out of range (got {value})")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("battery_level must be within [0.0, 1.0] (got {0})")]
    BatteryLevel(f64),

    #[error("missing required field: {0}")]
    Missing(&'static str),
}

/// Convert a signed count into `u32`
pub fn count(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative { field, value });
    }
    u32::try_from(value).map_err(|_| ValidationError::OutOfRange { field, value })
}

/// Convert a signed monetary amount into `u64` cents
pub fn cents(field: &'static str, value: i64) -> Result<u64, ValidationError> {
    u64::try_from(value).map_err(|_| ValidationError::Negative { field, value })
}

/// Accept a battery level only if it is a finite value in [0.0, 1.0]
pub fn battery_level(value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::BatteryLevel(value))
    }
}

/// Reject empty required text fields
pub fn required(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(value)
    }
}

/// Keep the first occurrence of every SKU, preserving backend order
pub fn dedupe_skus(store_id: &str, items: Vec<InventoryItem>) -> Vec<InventoryItem> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.sku.clone());
            if !fresh {
                warn!(store_id = %store_id, sku = %item.sku, "Dropping duplicate SKU");
            }
            fresh
        })
        .collect()
}

/// Drop an estimated delivery that precedes the order date
pub fn delivery_window(
    order_id: &str,
    order_date: NaiveDate,
    estimated_delivery: Option<NaiveDate>,
) -> Option<NaiveDate> {
    match estimated_delivery {
        Some(eta) if eta < order_date => {
            warn!(
                order_id = %order_id,
                %order_date,
                estimated_delivery = %eta,
                "Estimated delivery precedes order date, dropping it"
            );
            None
        }
        other => other,
    }
}
