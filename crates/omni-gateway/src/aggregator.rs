//! Aggregator - composes one store from three independent connectors
//!
//! Each connector owns a disjoint slot of the [`Store`], so merging is a
//! plain structural composition. Connector failures never reach this
//! layer (see [`Connector::fetch`]); the only hard failure is an unknown
//! store id.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use omni_core::{
    Connector, GatewayError, GatewayResult, InventoryItem, Order, RobotTelemetry, Store,
    StoreDirectory, StoreEntry,
};
use tracing::{debug, info, instrument, warn};

use crate::options::GatewayOptions;

/// Connector filling the `inventory` slot
pub type InventorySource = Arc<dyn Connector<Entity = InventoryItem>>;
/// Connector filling the `orders` slot
pub type OrderSource = Arc<dyn Connector<Entity = Order>>;
/// Connector filling the `robots` slot
pub type RobotSource = Arc<dyn Connector<Entity = RobotTelemetry>>;

/// Fans out to the three backend connectors and merges their slots.
///
/// The aggregator holds no mutable state: every call is a fresh fan-out
/// and it can be shared freely behind an `Arc`.
pub struct Aggregator {
    directory: Arc<StoreDirectory>,
    inventory: InventorySource,
    orders: OrderSource,
    robots: RobotSource,
    options: GatewayOptions,
}

impl Aggregator {
    pub fn new(
        directory: StoreDirectory,
        inventory: InventorySource,
        orders: OrderSource,
        robots: RobotSource,
        options: GatewayOptions,
    ) -> Self {
        info!(
            stores = directory.len(),
            inventory = %inventory.name(),
            orders = %orders.name(),
            robots = %robots.name(),
            connector_timeout_ms = options.connector_timeout().as_millis() as u64,
            max_concurrent_stores = options.concurrency(),
            "Aggregator ready"
        );

        Self {
            directory: Arc::new(directory),
            inventory,
            orders,
            robots,
            options,
        }
    }

    /// Assemble the store with id `store_id`.
    ///
    /// Fails with [`GatewayError::StoreNotFound`] before any connector is
    /// called when the id is not in the directory.
    #[instrument(skip(self))]
    pub async fn get_store(&self, store_id: &str) -> GatewayResult<Store> {
        let entry = self
            .directory
            .get(store_id)
            .ok_or_else(|| GatewayError::StoreNotFound(store_id.to_string()))?;

        Ok(self.assemble(entry).await)
    }

    /// Assemble every store in directory order.
    ///
    /// Up to `max_concurrent_stores` stores are aggregated at once; results
    /// are yielded in directory order, not completion order.
    #[instrument(skip(self))]
    pub async fn list_stores(&self) -> Vec<Store> {
        stream::iter(self.directory.entries().to_vec())
            .map(|entry| async move { self.assemble(&entry).await })
            .buffered(self.options.concurrency())
            .collect()
            .await
    }

    async fn assemble(&self, entry: &StoreEntry) -> Store {
        let started = Instant::now();
        let limit = self.options.connector_timeout();

        // Joined in this task: dropping the future cancels every call
        let (inventory, orders, robots) = tokio::join!(
            fill_slot(self.inventory.as_ref(), &entry.id, limit),
            fill_slot(self.orders.as_ref(), &entry.id, limit),
            fill_slot(self.robots.as_ref(), &entry.id, limit),
        );

        debug!(
            store_id = %entry.id,
            inventory = inventory.len(),
            orders = orders.len(),
            robots = robots.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Store assembled"
        );

        Store {
            id: entry.id.clone(),
            name: entry.name.clone(),
            city: entry.city.clone(),
            country: entry.country.clone(),
            inventory,
            orders,
            robots,
        }
    }
}

/// Fetch one slot, giving up after `limit`
async fn fill_slot<C>(connector: &C, store_id: &str, limit: Duration) -> Vec<C::Entity>
where
    C: Connector + ?Sized,
{
    match tokio::time::timeout(limit, connector.fetch(store_id)).await {
        Ok(entities) => entities,
        Err(_) => {
            warn!(
                connector = %connector.name(),
                store_id = %store_id,
                kind = "timeout",
                timeout_ms = limit.as_millis() as u64,
                "Connector did not answer in time, degrading to empty slot"
            );
            Vec::new()
        }
    }
}
