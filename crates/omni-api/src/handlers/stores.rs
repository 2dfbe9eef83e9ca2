//! Store handlers

use axum::extract::{Path, State};
use axum::Json;
use omni_core::Store;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct StoresResponse {
    pub items: Vec<Store>,
}

/// GET /api/v1/stores
/// Every store in directory order
pub async fn list_stores(State(state): State<AppState>) -> Json<StoresResponse> {
    let items = state.queries().stores().await;
    Json(StoresResponse { items })
}

/// GET /api/v1/stores/{store_id}
pub async fn get_store(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<Store>, ApiError> {
    let store = state.queries().store(&store_id).await?;
    Ok(Json(store))
}
