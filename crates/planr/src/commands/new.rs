//! Start a new plan.

use anyhow::Result;
use planr_core::context::RemoteContextLoader;
use planr_core::orchestrator::{
    ContextOverride, NewPlanOptions, Orchestrator, SessionMode, Status,
};
use planr_core::project::resolve_or_create_project;
use std::sync::Arc;
use tracing::debug;

use crate::cli::NewArgs;
use crate::config::Config;
use crate::term;

pub async fn execute(args: NewArgs, session: SessionMode, config: &Config) -> Result<()> {
    let client = super::client(config)?;
    let cwd = super::current_dir()?;
    let (dir, project) = resolve_or_create_project(client.as_ref(), &cwd).await?;
    debug!("Starting plan in project {} ({:?})", project.id, dir.root());

    let context_override =
        ContextOverride::from_flags(args.no_global_context, args.global_context_file);

    let pb = term::spinner("Starting new plan...");
    let status_pb = pb.clone();
    let orchestrator = Orchestrator::new(
        client.clone(),
        Arc::new(RemoteContextLoader::new(client)),
        Arc::new(dir),
    )
    .with_status_sink(Arc::new(move |status: &Status| {
        status_pb.suspend(|| println!("{}", term::status_line(status)));
    }));

    let result = orchestrator
        .start_new_plan(NewPlanOptions {
            name: args.name,
            project_id: project.id,
            context_override,
            context_dir: args.context_dir,
            session,
        })
        .await;
    pb.finish_and_clear();

    term::render_summary(&result?);
    Ok(())
}
