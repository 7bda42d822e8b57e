//! Router test helpers.

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use planr_core::Database;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use crate::config::{Config, DEFAULT_BIND};
use crate::routes::create_router;
use crate::state::AppState;
use crate::tokens::issue_token;

/// Router over an in-memory database with one token for `user-1` in `org-1`.
pub fn test_app() -> (Router, Arc<AppState>, String) {
    let db = Database::open_in_memory().unwrap();
    let (_, token) = issue_token(&db, "user-1", "org-1", "test").unwrap();
    let bind: SocketAddr = DEFAULT_BIND.parse().unwrap();
    let state = AppState::new(Config::in_dir(PathBuf::from("/tmp/planr-test"), bind), db);
    (create_router(state.clone()), state, token)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
