//! Project and plan creation routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Extension, Json, Router,
};
use planr_core::types::{
    ContextEntry, CreatePlanRequest, CreateProjectRequest, PlanIdentity, Project,
    DEFAULT_PLAN_NAME,
};
use planr_core::ConfigStore;
use std::sync::Arc;
use tracing::info;

use crate::error::{ApiFailure, ApiResult};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Name of the note that carries the stored global context into a plan
pub const GLOBAL_CONTEXT_ENTRY: &str = "global context";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/projects", post(create_project))
        .route("/projects/{id}/plans", post(create_plan))
}

async fn create_project(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiFailure::bad_request("Project name is required"));
    }

    let project = state.db.create_project(&auth.user_id, &auth.org_id, name)?;
    info!("Created project '{}' ({})", project.name, project.id);

    Ok((StatusCode::CREATED, Json(project.into())))
}

/// Create a plan, attaching the stored global context unless the request suppresses it
async fn create_plan(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<String>,
    Json(req): Json<CreatePlanRequest>,
) -> ApiResult<(StatusCode, Json<PlanIdentity>)> {
    let project = state
        .db
        .get_project(&project_id)?
        .filter(|p| auth.owns(&p.user_id, &p.org_id))
        .ok_or_else(|| ApiFailure::not_found("Project not found"))?;

    let name = match req.name.trim() {
        "" => DEFAULT_PLAN_NAME,
        name => name,
    };
    let plan = state.db.create_plan(&project, name)?;

    if !req.suppress_global_context {
        if let Some(content) = state.db.get_global_context(&auth.user_id, &auth.org_id)? {
            state.db.insert_context_entries(
                &plan.id,
                &[ContextEntry::note(GLOBAL_CONTEXT_ENTRY, content)],
            )?;
        }
    }

    info!(
        "Created plan '{}' ({}) in project {}, global context {}",
        plan.name,
        plan.id,
        project.id,
        if req.suppress_global_context {
            "suppressed"
        } else {
            "inherited"
        }
    );

    Ok((StatusCode::CREATED, Json(plan.into())))
}
