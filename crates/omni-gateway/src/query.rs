//! Query surface - the read operations exposed to clients

use std::sync::Arc;

use omni_core::{DashboardSummary, GatewayResult, Store};
use serde::{Deserialize, Serialize};

use crate::aggregator::Aggregator;
use crate::summary::summarize;

/// Stores and the KPIs computed over exactly those stores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub stores: Vec<Store>,
    pub summary: DashboardSummary,
}

/// Stateless query front over an [`Aggregator`].
///
/// Every call is a fresh aggregation pass; nothing is cached between calls.
#[derive(Clone)]
pub struct QueryService {
    aggregator: Arc<Aggregator>,
}

impl QueryService {
    pub fn new(aggregator: Arc<Aggregator>) -> Self {
        Self { aggregator }
    }

    /// One store per directory entry, in directory order
    pub async fn stores(&self) -> Vec<Store> {
        self.aggregator.list_stores().await
    }

    /// A single store, or `StoreNotFound`
    pub async fn store(&self, id: &str) -> GatewayResult<Store> {
        self.aggregator.get_store(id).await
    }

    /// KPIs over a fresh listing
    pub async fn dashboard_summary(&self) -> DashboardSummary {
        summarize(&self.stores().await)
    }

    /// Listing and KPIs from one snapshot
    pub async fn dashboard(&self) -> Dashboard {
        let stores = self.stores().await;
        let summary = summarize(&stores);
        Dashboard { stores, summary }
    }
}
