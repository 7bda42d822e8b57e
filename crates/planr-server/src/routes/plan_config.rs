//! Default plan configuration routes.

use axum::{extract::State, routing::get, Extension, Json, Router};
use planr_core::types::PlanConfig;
use planr_core::ConfigStore;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiResult;
use crate::middleware::AuthContext;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/default_plan_config",
        get(get_default_plan_config).put(update_default_plan_config),
    )
}

async fn get_default_plan_config(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<PlanConfig>> {
    let config = state
        .db
        .default_plan_config(&auth.user_id, &auth.org_id)?;
    Ok(Json(config))
}

async fn update_default_plan_config(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(config): Json<PlanConfig>,
) -> ApiResult<Json<PlanConfig>> {
    state
        .db
        .set_default_plan_config(&auth.user_id, &auth.org_id, &config)?;

    info!(
        "Default plan config updated: auto_mode={}, auto_load_context={}, model_pack={}",
        config.auto_mode, config.auto_load_context, config.model_pack_name
    );
    Ok(Json(config))
}
