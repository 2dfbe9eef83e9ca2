//! Connector trait - the contract every backend adapter implements

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::ConnectorResult;

/// Fetches one kind of canonical entity for a store from one backend.
///
/// Implementors only provide `try_fetch`. Callers use `fetch`, which
/// never fails: any error is logged with the connector name and store id
/// and the slot degrades to an empty sequence. A backend outage is thus
/// indistinguishable from a backend that has no data for the store.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Canonical entity produced by this connector
    type Entity: Send;

    /// Backend name used in diagnostics
    fn name(&self) -> &str;

    /// Fetch entities for `store_id`, in backend order
    async fn try_fetch(&self, store_id: &str) -> ConnectorResult<Vec<Self::Entity>>;

    /// Fetch entities for `store_id`, degrading to empty on any failure
    async fn fetch(&self, store_id: &str) -> Vec<Self::Entity> {
        match self.try_fetch(store_id).await {
            Ok(entities) => {
                debug!(
                    connector = %self.name(),
                    store_id = %store_id,
                    count = entities.len(),
                    "Connector fetch succeeded"
                );
                entities
            }
            Err(e) => {
                warn!(
                    connector = %self.name(),
                    store_id = %store_id,
                    kind = e.kind(),
                    error = %e,
                    "Connector fetch failed, degrading to empty slot"
                );
                Vec::new()
            }
        }
    }
}
