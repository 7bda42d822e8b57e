//! The remote service interface consumed by the orchestrator and the CLI.
//!
//! [`crate::client::ApiClient`] is the HTTP implementation; tests substitute
//! in-memory fakes.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{
    CreatePlanRequest, LoadContextRequest, LoadContextResponse, PlanConfig, PlanIdentity, Project,
};

/// Result of a single remote call.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Stateless request/response API exposed by planr-server.
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Create a project to hold plans.
    async fn create_project(&self, name: &str) -> ApiResult<Project>;

    /// Create a plan inside a project.
    async fn create_plan(&self, project_id: &str, req: &CreatePlanRequest)
    -> ApiResult<PlanIdentity>;

    /// Fetch the caller's default plan configuration.
    async fn get_default_plan_config(&self) -> ApiResult<PlanConfig>;

    /// Replace the caller's default plan configuration.
    async fn update_default_plan_config(&self, config: &PlanConfig) -> ApiResult<PlanConfig>;

    /// `Ok(None)` when no global context is set.
    async fn get_global_context(&self) -> ApiResult<Option<String>>;

    async fn set_global_context(&self, content: &str) -> ApiResult<()>;

    /// Idempotent: clearing an absent global context succeeds.
    async fn clear_global_context(&self) -> ApiResult<()>;

    /// Attach context entries to a plan.
    async fn load_context(
        &self,
        plan_id: &str,
        req: &LoadContextRequest,
    ) -> ApiResult<LoadContextResponse>;
}
