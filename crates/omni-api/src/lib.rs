//! omni-api - OmniChain REST API layer
//!
//! Binds the [`QueryService`](omni_gateway::QueryService) to HTTP/JSON
//! routes. All aggregation happens below this layer; handlers only map
//! results and errors onto responses.
//!
//! # Usage
//!
//! ```ignore
//! use omni_api::{create_router, AppState};
//!
//! let state = AppState::new(QueryService::new(Arc::new(aggregator)));
//! let router = create_router(state);
//! axum::serve(listener, router).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the OmniChain REST API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Store routes
        .route("/api/v1/stores", get(handlers::stores::list_stores))
        .route("/api/v1/stores/{store_id}", get(handlers::stores::get_store))
        // Dashboard routes
        .route("/api/v1/dashboard", get(handlers::dashboard::get_dashboard))
        .route(
            "/api/v1/dashboard/summary",
            get(handlers::dashboard::get_summary),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
