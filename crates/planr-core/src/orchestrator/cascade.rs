//! Post-creation decisions applied to a new plan.
//!
//! Stages run in order after the plan pointers are written:
//! 1. global-context override
//! 2. auto-mode resolution
//! 3. model-pack resolution
//! 4. auto-context loading
//! 5. suggested next commands

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::context::{ContextLoader, LoadParams};
use crate::error::{Error, Result};
use crate::types::{AutoMode, LoadContextResponse, PlanConfig};

/// How a new plan's global context is seeded. Exactly one case is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContextOverride {
    /// The server attaches the stored global context
    #[default]
    Inherit,
    /// No global context for this plan
    Suppress,
    /// Attach this file's contents as a note instead of the stored global context
    File(PathBuf),
}

impl ContextOverride {
    /// Build from CLI flags. A file override wins over plain suppression.
    pub fn from_flags(no_global_context: bool, file: Option<PathBuf>) -> Self {
        match file {
            Some(path) if !path.as_os_str().is_empty() => ContextOverride::File(path),
            _ if no_global_context => ContextOverride::Suppress,
            _ => ContextOverride::Inherit,
        }
    }

    /// Whether plan creation must tell the server not to attach the stored global context.
    pub fn suppresses_server_context(&self) -> bool {
        !matches!(self, ContextOverride::Inherit)
    }
}

/// Whether the command runs inside an interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    Repl,
    #[default]
    Command,
}

/// Resolves the effective settings of a new plan from its config.
pub trait PlanResolver: Send + Sync {
    fn resolve_auto_mode(&self, config: &PlanConfig) -> AutoMode;

    fn resolve_model_pack(&self, config: &PlanConfig) -> String;
}

/// Takes the server-provided config as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerConfigResolver;

impl PlanResolver for ServerConfigResolver {
    fn resolve_auto_mode(&self, config: &PlanConfig) -> AutoMode {
        config.auto_mode
    }

    fn resolve_model_pack(&self, config: &PlanConfig) -> String {
        config.model_pack_name.clone()
    }
}

/// Operator-facing status emitted while starting a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Started { name: String },
    UsingDefaultConfig,
    GlobalContextLoaded { path: PathBuf },
    GlobalContextDisabled,
    AutoLoadEnabled,
    ContextLoaded(LoadContextResponse),
}

/// Stage 1: apply the global-context override.
pub async fn apply_context_override(
    loader: &dyn ContextLoader,
    plan_id: &str,
    context_override: &ContextOverride,
) -> Result<Option<Status>> {
    match context_override {
        ContextOverride::File(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| Error::read_file("global context file", path, e))?;
            loader.load(plan_id, &[], &LoadParams::note(content)).await?;
            Ok(Some(Status::GlobalContextLoaded { path: path.clone() }))
        }
        ContextOverride::Suppress => Ok(Some(Status::GlobalContextDisabled)),
        ContextOverride::Inherit => {
            debug!("Global context left to the server for plan {}", plan_id);
            Ok(None)
        }
    }
}

/// Stage 4: load the base directory when the config asks for it.
pub async fn auto_load_context(
    loader: &dyn ContextLoader,
    plan_id: &str,
    config: &PlanConfig,
    base_dir: &Path,
) -> Result<Vec<Status>> {
    if !config.auto_load_context {
        return Ok(Vec::new());
    }

    let base_dir = if base_dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        base_dir
    };

    let resp = loader
        .load(plan_id, &[base_dir.to_path_buf()], &LoadParams::auto_load())
        .await?;

    Ok(vec![Status::AutoLoadEnabled, Status::ContextLoaded(resp)])
}

/// Stage 5: commands to suggest after the plan starts.
pub fn suggested_commands(session: SessionMode, auto_load_context: bool) -> Vec<&'static str> {
    let mut cmds = match session {
        SessionMode::Repl => vec!["config", "plans", "cd", "models"],
        SessionMode::Command => vec!["tell", "chat", "config"],
    };

    if !auto_load_context {
        cmds.insert(0, "load");
    }

    cmds
}
