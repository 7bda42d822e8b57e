//! Plan bootstrap - create a plan, select it locally, and seed its context.
//!
//! ## Flow
//!
//! ```text
//!  create_plan ──┐
//!                ├─ join ─→ write current plan ─→ write current branch ─→ cascade
//!  get_config  ──┘
//! ```
//!
//! The two remote calls run concurrently and the join fails fast. Pointers are
//! written only after both calls succeed, and the cascade only after both
//! pointers are written. A plan created alongside a failed config fetch is
//! left on the server; nothing compensates for it.

mod cascade;
mod join;

pub use cascade::{
    apply_context_override, auto_load_context, suggested_commands, ContextOverride,
    PlanResolver, ServerConfigResolver, SessionMode, Status,
};
pub use join::join_pair;

use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::context::ContextLoader;
use crate::error::{Error, Result};
use crate::project::PointerStore;
use crate::remote::RemoteService;
use crate::types::{
    AutoMode, CreatePlanRequest, PlanConfig, PlanIdentity, DEFAULT_BRANCH, DEFAULT_PLAN_NAME,
};

/// Input for [`Orchestrator::start_new_plan`].
#[derive(Debug, Clone, Default)]
pub struct NewPlanOptions {
    pub name: Option<String>,
    pub project_id: String,
    pub context_override: ContextOverride,
    /// Base directory for auto-loaded context (`.` when unset)
    pub context_dir: Option<PathBuf>,
    pub session: SessionMode,
}

/// Everything the CLI needs to report a newly started plan.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub plan: PlanIdentity,
    /// Name shown to the operator (`draft` when none was given)
    pub display_name: String,
    pub config: PlanConfig,
    pub auto_mode: AutoMode,
    pub model_pack: String,
    pub statuses: Vec<Status>,
    pub suggested_commands: Vec<&'static str>,
}

/// Called with each status as soon as the cascade produces it.
pub type StatusSink = Arc<dyn Fn(&Status) + Send + Sync>;

/// Drives plan creation against the remote service.
pub struct Orchestrator {
    remote: Arc<dyn RemoteService>,
    loader: Arc<dyn ContextLoader>,
    pointers: Arc<dyn PointerStore>,
    resolver: Arc<dyn PlanResolver>,
    on_status: Option<StatusSink>,
}

impl Orchestrator {
    pub fn new(
        remote: Arc<dyn RemoteService>,
        loader: Arc<dyn ContextLoader>,
        pointers: Arc<dyn PointerStore>,
    ) -> Self {
        Self {
            remote,
            loader,
            pointers,
            resolver: Arc::new(ServerConfigResolver),
            on_status: None,
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn PlanResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Report each status as it is produced.
    pub fn with_status_sink(mut self, sink: StatusSink) -> Self {
        self.on_status = Some(sink);
        self
    }

    fn push_status(&self, statuses: &mut Vec<Status>, status: Status) {
        if let Some(sink) = &self.on_status {
            sink(&status);
        }
        statuses.push(status);
    }

    /// Create a plan and fetch its default config concurrently, then select it locally.
    pub async fn create_and_bootstrap_plan(
        &self,
        name: Option<&str>,
        project_id: &str,
        context_override: &ContextOverride,
    ) -> Result<(PlanIdentity, PlanConfig)> {
        let req = CreatePlanRequest {
            name: name.unwrap_or_default().to_string(),
            suppress_global_context: context_override.suppresses_server_context(),
        };

        let remote = Arc::clone(&self.remote);
        let project_id = project_id.to_string();
        let create = async move {
            remote
                .create_plan(&project_id, &req)
                .await
                .map_err(|e| Error::from(e.during("creating plan")))
        };

        let remote = Arc::clone(&self.remote);
        let fetch_config = async move {
            remote
                .get_default_plan_config()
                .await
                .map_err(|e| Error::from(e.during("getting plan config")))
        };

        let (plan, config) = join_pair(create, fetch_config).await?;

        self.pointers
            .write_current_plan(&plan.id)
            .map_err(|e| Error::persist("current plan", e))?;
        self.pointers
            .write_current_branch(DEFAULT_BRANCH)
            .map_err(|e| Error::persist("current branch", e))?;

        info!("Created plan {} ({})", plan.name, plan.id);
        Ok((plan, config))
    }

    /// Bootstrap a plan and run the post-creation cascade.
    pub async fn start_new_plan(&self, opts: NewPlanOptions) -> Result<BootstrapReport> {
        let (plan, config) = self
            .create_and_bootstrap_plan(
                opts.name.as_deref(),
                &opts.project_id,
                &opts.context_override,
            )
            .await?;

        let display_name = opts
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_PLAN_NAME.to_string());

        let mut statuses = Vec::new();
        self.push_status(
            &mut statuses,
            Status::Started {
                name: display_name.clone(),
            },
        );
        self.push_status(&mut statuses, Status::UsingDefaultConfig);

        if let Some(status) =
            apply_context_override(self.loader.as_ref(), &plan.id, &opts.context_override).await?
        {
            self.push_status(&mut statuses, status);
        }

        let auto_mode = self.resolver.resolve_auto_mode(&config);
        let model_pack = self.resolver.resolve_model_pack(&config);

        let base_dir = opts.context_dir.unwrap_or_else(|| PathBuf::from("."));
        for status in auto_load_context(self.loader.as_ref(), &plan.id, &config, &base_dir).await? {
            self.push_status(&mut statuses, status);
        }

        let suggested_commands = suggested_commands(opts.session, config.auto_load_context);

        Ok(BootstrapReport {
            plan,
            display_name,
            config,
            auto_mode,
            model_pack,
            statuses,
            suggested_commands,
        })
    }
}
