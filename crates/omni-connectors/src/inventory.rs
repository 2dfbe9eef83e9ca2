//! InventoryConnector - partner marketplace over REST/JSON

use std::time::Duration;

use async_trait::async_trait;
use omni_core::validation;
use omni_core::{Connector, ConnectorError, ConnectorResult, InventoryItem};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::config::InventoryConnectorConfig;
use crate::http;

/// Inventory record as served by `GET /inventory`
#[derive(Debug, Deserialize)]
struct InventoryRecord {
    sku: String,
    name: String,
    category: String,
    quantity: i64,
    price_cents: i64,
    store_id: String,
}

impl InventoryRecord {
    fn into_item(self) -> ConnectorResult<InventoryItem> {
        Ok(InventoryItem {
            sku: validation::required("sku", self.sku)?,
            name: self.name,
            category: self.category,
            quantity: validation::count("quantity", self.quantity)?,
            price_cents: validation::cents("price_cents", self.price_cents)?,
        })
    }
}

/// Fills the `inventory` slot from the marketplace REST API.
///
/// The store filter is sent as a query parameter, but the backend is not
/// trusted to apply it: records for other stores are discarded here.
pub struct InventoryConnector {
    client: Client,
    base_url: Url,
}

impl InventoryConnector {
    /// Create a connector for the configured marketplace
    pub fn new(config: &InventoryConnectorConfig) -> ConnectorResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ConnectorError::InvalidRequest(format!(
                "Invalid inventory base URL '{}': {}",
                config.base_url, e
            ))
        })?;
        let client = http::client(Duration::from_millis(config.request_timeout_ms))?;

        Ok(Self { client, base_url })
    }

    #[instrument(skip(self))]
    async fn list_inventory(&self, store_id: &str) -> ConnectorResult<Vec<InventoryRecord>> {
        // Appended as a segment so a path prefix on the base URL is kept
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ConnectorError::InvalidRequest(format!(
                    "Inventory base URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push("inventory");
        url.query_pairs_mut().append_pair("store_id", store_id);
        debug!("Listing inventory from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(http::request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectorError::Protocol(format!(
                "HTTP {} from inventory backend",
                status
            )));
        }

        response
            .json::<Vec<InventoryRecord>>()
            .await
            .map_err(|e| ConnectorError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Connector for InventoryConnector {
    type Entity = InventoryItem;

    fn name(&self) -> &str {
        "inventory-rest"
    }

    async fn try_fetch(&self, store_id: &str) -> ConnectorResult<Vec<InventoryItem>> {
        http::require_store_id(store_id)?;

        let records = self.list_inventory(store_id).await?;
        let items = records
            .into_iter()
            .filter(|r| r.store_id == store_id)
            .map(InventoryRecord::into_item)
            .collect::<ConnectorResult<Vec<_>>>()?;

        Ok(validation::dedupe_skus(store_id, items))
    }
}
