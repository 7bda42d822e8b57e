//! Context loading - attaching notes, files and definitions to a plan.

mod collect;
mod defs;

pub use collect::{collect_entries, IGNORE_FILE, MAX_FILE_BYTES};
pub use defs::extract_definitions;

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::remote::RemoteService;
use crate::types::{LoadContextRequest, LoadContextResponse};

/// Options for a single load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadParams {
    /// Literal note text to attach
    pub note: Option<String>,
    /// Load definition outlines instead of full file bodies
    pub defs_only: bool,
    /// Don't warn about directories without an ignore file
    pub skip_ignore_warning: bool,
    /// Tag entries as auto-loaded (vs. loaded by the operator)
    pub auto_loaded: bool,
}

impl LoadParams {
    /// Parameters used when a new plan loads its base directory automatically.
    pub fn auto_load() -> Self {
        Self {
            note: None,
            defs_only: true,
            skip_ignore_warning: true,
            auto_loaded: true,
        }
    }

    pub fn note(content: impl Into<String>) -> Self {
        Self {
            note: Some(content.into()),
            ..Self::default()
        }
    }
}

/// Attaches context to a plan.
#[async_trait]
pub trait ContextLoader: Send + Sync {
    async fn load(
        &self,
        plan_id: &str,
        paths: &[PathBuf],
        params: &LoadParams,
    ) -> Result<LoadContextResponse>;
}

/// Loader that reads local paths and ships the entries to the remote service.
pub struct RemoteContextLoader {
    remote: Arc<dyn RemoteService>,
}

impl RemoteContextLoader {
    pub fn new(remote: Arc<dyn RemoteService>) -> Self {
        Self { remote }
    }
}

#[async_trait]
impl ContextLoader for RemoteContextLoader {
    async fn load(
        &self,
        plan_id: &str,
        paths: &[PathBuf],
        params: &LoadParams,
    ) -> Result<LoadContextResponse> {
        let paths = paths.to_vec();
        let params_owned = params.clone();
        let entries = tokio::task::spawn_blocking(move || collect_entries(&paths, &params_owned))
            .await
            .map_err(|e| crate::error::Error::Other(format!("context loading task failed: {}", e)))??;

        if entries.is_empty() {
            info!("Nothing to load into plan {}", plan_id);
            return Ok(LoadContextResponse::default());
        }

        let resp = self
            .remote
            .load_context(plan_id, &LoadContextRequest { entries })
            .await
            .map_err(|e| e.during("loading context"))?;
        info!(
            "Loaded {} context entries (~{} tokens) into plan {}",
            resp.loaded, resp.total_tokens, plan_id
        );
        Ok(resp)
    }
}
