//! Global context routes.
//!
//! One free-text note per (user, organization). Empty content reads as absent.

use axum::{extract::State, http::StatusCode, routing::get, Extension, Json, Router};
use planr_core::types::{GlobalContextRequest, GlobalContextResponse};
use planr_core::ConfigStore;
use std::sync::Arc;
use tracing::info;

use crate::error::{ApiFailure, ApiResult};
use crate::middleware::AuthContext;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/global_context",
        get(get_global_context)
            .post(set_global_context)
            .delete(clear_global_context),
    )
}

async fn get_global_context(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<GlobalContextResponse>> {
    let content = state
        .db
        .get_global_context(&auth.user_id, &auth.org_id)?
        .ok_or_else(|| ApiFailure::not_found("No global context set"))?;

    Ok(Json(GlobalContextResponse { content }))
}

async fn set_global_context(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<GlobalContextRequest>,
) -> ApiResult<StatusCode> {
    state
        .db
        .set_global_context(&auth.user_id, &auth.org_id, &req.content)?;

    info!(
        "Global context updated ({} bytes) by token {}",
        req.content.len(),
        auth.token_id
    );
    Ok(StatusCode::OK)
}

async fn clear_global_context(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<StatusCode> {
    state
        .db
        .clear_global_context(&auth.user_id, &auth.org_id)?;

    info!("Global context cleared by token {}", auth.token_id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::testing::{body_json, send, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_absent_is_not_found() {
        let (app, _state, token) = test_app();

        let resp = send(&app, "GET", "/global_context", Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["error"], "No global context set");
    }

    #[tokio::test]
    async fn test_set_get_clear() {
        let (app, _state, token) = test_app();

        let resp = send(
            &app,
            "POST",
            "/global_context",
            Some(&token),
            Some(json!({"content": "prefer composition"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = send(&app, "GET", "/global_context", Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["content"], "prefer composition");

        let resp = send(&app, "DELETE", "/global_context", Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = send(&app, "GET", "/global_context", Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_clear_without_record_succeeds() {
        let (app, _state, token) = test_app();

        let resp = send(&app, "DELETE", "/global_context", Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_set_empty_reads_as_absent() {
        let (app, _state, token) = test_app();

        send(
            &app,
            "POST",
            "/global_context",
            Some(&token),
            Some(json!({"content": ""})),
        )
        .await;

        let resp = send(&app, "GET", "/global_context", Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
