//! Summary engine - cross-store KPIs

use omni_core::{DashboardSummary, OrderStatus, Store};

/// Compute dashboard KPIs over a snapshot of stores.
///
/// Pure: the summary reflects exactly the stores passed in, so callers
/// that also return the list must summarize that same list.
pub fn summarize(stores: &[Store]) -> DashboardSummary {
    let inventory = stores.iter().flat_map(|s| s.inventory.iter());

    DashboardSummary {
        total_stores: stores.len(),
        total_skus: stores.iter().map(|s| s.inventory.len()).sum(),
        total_orders_pending: stores
            .iter()
            .flat_map(|s| s.orders.iter())
            .filter(|o| o.status == OrderStatus::Pending)
            .count(),
        total_robots_active: stores
            .iter()
            .flat_map(|s| s.robots.iter())
            .filter(|r| r.status.is_active())
            .count(),
        low_stock_alerts: inventory.filter(|i| i.is_low_stock()).cloned().collect(),
    }
}
