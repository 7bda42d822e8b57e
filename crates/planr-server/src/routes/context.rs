//! Plan context routes.

use axum::{
    extract::{Path, State},
    routing::post,
    Extension, Json, Router,
};
use planr_core::types::{LoadContextRequest, LoadContextResponse};
use std::sync::Arc;
use tracing::info;

use crate::error::{ApiFailure, ApiResult};
use crate::middleware::AuthContext;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/plans/{id}/context", post(load_context))
}

async fn load_context(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(plan_id): Path<String>,
    Json(req): Json<LoadContextRequest>,
) -> ApiResult<Json<LoadContextResponse>> {
    let plan = state
        .db
        .get_plan(&plan_id)?
        .filter(|p| auth.owns(&p.user_id, &p.org_id))
        .ok_or_else(|| ApiFailure::not_found("Plan not found"))?;

    let loaded = state.db.insert_context_entries(&plan.id, &req.entries)?;
    let total_tokens = req.entries.iter().map(|e| e.estimated_tokens()).sum();

    info!(
        "Loaded {} context entries (~{} tokens) into plan {}",
        loaded, total_tokens, plan.id
    );

    Ok(Json(LoadContextResponse {
        loaded,
        total_tokens,
    }))
}
