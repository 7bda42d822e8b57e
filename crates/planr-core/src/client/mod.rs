//! API client for connecting to planr-server.
//!
//! # Usage
//!
//! ```rust,no_run
//! use planr_core::client::{ApiClient, ClientConfig};
//! use planr_core::remote::RemoteService;
//!
//! #[tokio::main]
//! async fn main() -> planr_core::Result<()> {
//!     let client = ApiClient::new(&ClientConfig::new("http://127.0.0.1:8787"))?;
//!     let content = client.get_global_context().await?;
//!     println!("{:?}", content);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::{ApiError, ApiErrorKind, Error, Result};
use crate::remote::{ApiResult, RemoteService};
use crate::types::*;

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL, e.g. `http://127.0.0.1:8787`
    pub url: String,
    /// Bearer token for authentication
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// API client for planr-server
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the server is available
    pub async fn health(&self) -> ApiResult<HealthResponse> {
        let resp = self.send(self.request(Method::GET, "/health")).await?;
        read_json(resp).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // HTTP Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Build request with auth header.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("API request: {} {}", method, url);

        let mut req = self.client.request(method, &url);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Send a request, turning transport failures and error statuses into [`ApiError`].
    async fn send(&self, req: RequestBuilder) -> ApiResult<Response> {
        let resp = send_raw(req).await?;
        if resp.status().is_client_error() || resp.status().is_server_error() {
            return Err(handle_api_error(resp).await);
        }
        Ok(resp)
    }
}

async fn send_raw(req: RequestBuilder) -> ApiResult<Response> {
    req.send()
        .await
        .map_err(|e| ApiError::transport(format!("error sending request: {}", e)))
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
    let body = resp
        .bytes()
        .await
        .map_err(|e| ApiError::transport(format!("error reading response: {}", e)))?;
    serde_json::from_slice(&body)
        .map_err(|e| ApiError::serialization(format!("error unmarshalling response: {}", e)))
}

/// Shared error-handling routine for every non-2xx response.
pub async fn handle_api_error(resp: Response) -> ApiError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    decode_api_error(status, &body)
}

/// Decode an error body into an [`ApiError`], falling back to the raw text.
pub fn decode_api_error(status: StatusCode, body: &str) -> ApiError {
    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiErrorKind::Unauthorized,
        StatusCode::NOT_FOUND => ApiErrorKind::NotFound,
        s if s.is_server_error() => ApiErrorKind::Server,
        _ => ApiErrorKind::Other,
    };

    let msg = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.trim().is_empty() => status.to_string(),
        Err(_) => format!("{}: {}", status, body.trim()),
    };

    ApiError::new(kind, msg)
}

#[async_trait]
impl RemoteService for ApiClient {
    async fn create_project(&self, name: &str) -> ApiResult<Project> {
        let req = CreateProjectRequest {
            name: name.to_string(),
        };
        let resp = self
            .send(self.request(Method::POST, "/projects").json(&req))
            .await?;
        read_json(resp).await
    }

    async fn create_plan(
        &self,
        project_id: &str,
        req: &CreatePlanRequest,
    ) -> ApiResult<PlanIdentity> {
        let path = format!("/projects/{}/plans", project_id);
        let resp = self.send(self.request(Method::POST, &path).json(req)).await?;
        read_json(resp).await
    }

    async fn get_default_plan_config(&self) -> ApiResult<PlanConfig> {
        let resp = self
            .send(self.request(Method::GET, "/default_plan_config"))
            .await?;
        read_json(resp).await
    }

    async fn update_default_plan_config(&self, config: &PlanConfig) -> ApiResult<PlanConfig> {
        let resp = self
            .send(self.request(Method::PUT, "/default_plan_config").json(config))
            .await?;
        read_json(resp).await
    }

    async fn get_global_context(&self) -> ApiResult<Option<String>> {
        let resp = send_raw(self.request(Method::GET, "/global_context")).await?;

        if resp.status() == StatusCode::NOT_FOUND {
            // No global context set
            return Ok(None);
        }
        if resp.status().is_client_error() || resp.status().is_server_error() {
            return Err(handle_api_error(resp).await);
        }

        let data: GlobalContextResponse = read_json(resp).await?;
        Ok(Some(data.content))
    }

    async fn set_global_context(&self, content: &str) -> ApiResult<()> {
        let req = GlobalContextRequest {
            content: content.to_string(),
        };
        self.send(self.request(Method::POST, "/global_context").json(&req))
            .await?;
        Ok(())
    }

    async fn clear_global_context(&self) -> ApiResult<()> {
        self.send(self.request(Method::DELETE, "/global_context"))
            .await?;
        Ok(())
    }

    async fn load_context(
        &self,
        plan_id: &str,
        req: &LoadContextRequest,
    ) -> ApiResult<LoadContextResponse> {
        let path = format!("/plans/{}/context", plan_id);
        let resp = self.send(self.request(Method::POST, &path).json(req)).await?;
        read_json(resp).await
    }
}
