use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use vitrine_shared::HealthResponse;

use crate::AppState;

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let seeded = state.back_office.read().await.repo().is_seeded();
    Json(HealthResponse::healthy("vitrine-api", env!("CARGO_PKG_VERSION"), seeded))
}

/// Returns Prometheus metrics.
pub async fn metrics(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}
