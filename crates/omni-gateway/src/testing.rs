//! In-memory connectors for aggregation tests
//!
//! [`StaticConnector`] serves canned entities per store and can be told to
//! fail, to stall, or to report how often it was called and how many calls
//! were in flight at once.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use omni_core::{Connector, ConnectorError, ConnectorResult};

/// Canned connector with fault, latency, call-count and in-flight injection
pub struct StaticConnector<T> {
    name: String,
    data: HashMap<String, Vec<T>>,
    failure: Option<fn() -> ConnectorError>,
    delays: HashMap<String, Duration>,
    calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

/// Decrements the in-flight gauge when a call finishes or is dropped
struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<T: Clone + Send + Sync + 'static> StaticConnector<T> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data: HashMap::new(),
            failure: None,
            delays: HashMap::new(),
            calls: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Serve `entities` for `store_id`
    pub fn with_store(mut self, store_id: &str, entities: Vec<T>) -> Self {
        self.data.insert(store_id.to_string(), entities);
        self
    }

    /// Fail every call with the error built by `failure`
    pub fn failing(mut self, failure: fn() -> ConnectorError) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Stall calls for `store_id` before answering
    pub fn with_delay(mut self, store_id: &str, delay: Duration) -> Self {
        self.delays.insert(store_id.to_string(), delay);
        self
    }

    /// Shared call counter, readable after the connector is moved
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Highest number of calls observed running at the same time
    pub fn peak_in_flight(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.peak_in_flight)
    }

    pub fn into_arc(self) -> Arc<dyn Connector<Entity = T>> {
        Arc::new(self)
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> Connector for StaticConnector<T> {
    type Entity = T;

    fn name(&self) -> &str {
        &self.name
    }

    async fn try_fetch(&self, store_id: &str) -> ConnectorResult<Vec<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(Arc::clone(&self.in_flight));
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(store_id) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(failure) = self.failure {
            return Err(failure());
        }

        Ok(self.data.get(store_id).cloned().unwrap_or_default())
    }
}
