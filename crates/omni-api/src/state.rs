//! Application state for the OmniChain API

use omni_gateway::QueryService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    queries: QueryService,
}

impl AppState {
    pub fn new(queries: QueryService) -> Self {
        Self { queries }
    }

    /// Query surface backing every route
    pub fn queries(&self) -> &QueryService {
        &self.queries
    }
}
