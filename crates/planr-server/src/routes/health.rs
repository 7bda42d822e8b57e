//! Health check endpoint.

use axum::{extract::State, Json};
use planr_core::types::HealthResponse;
use std::sync::Arc;
use tracing::debug;

use crate::state::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let db_healthy = state.db.ping().is_ok();
    debug!(
        "Health check on {} after {}s, database healthy: {}",
        state.config.bind,
        state.start_time.elapsed().as_secs(),
        db_healthy
    );

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
