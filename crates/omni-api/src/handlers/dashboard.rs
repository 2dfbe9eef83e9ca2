//! Dashboard handlers

use axum::extract::State;
use axum::Json;
use omni_core::DashboardSummary;
use omni_gateway::Dashboard;

use crate::state::AppState;

/// GET /api/v1/dashboard/summary
pub async fn get_summary(State(state): State<AppState>) -> Json<DashboardSummary> {
    Json(state.queries().dashboard_summary().await)
}

/// GET /api/v1/dashboard
/// Stores and summary computed from the same aggregation pass
pub async fn get_dashboard(State(state): State<AppState>) -> Json<Dashboard> {
    Json(state.queries().dashboard().await)
}
