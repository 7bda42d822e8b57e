//! Manual context loading into the current plan.

use anyhow::Result;
use colored::Colorize;
use planr_core::context::{ContextLoader, LoadParams, RemoteContextLoader};
use tracing::debug;

use crate::cli::LoadArgs;
use crate::config::Config;
use crate::term;

pub async fn execute(args: LoadArgs, config: &Config) -> Result<()> {
    if args.paths.is_empty() && args.note.is_none() {
        anyhow::bail!("Nothing to load. Pass files or directories, or --note TEXT");
    }

    let dir = super::project_dir()?;
    let plan_id = dir.require_current_plan()?;
    debug!("Loading {} paths into plan {}", args.paths.len(), plan_id);

    let params = LoadParams {
        note: args.note,
        defs_only: args.defs_only,
        skip_ignore_warning: false,
        auto_loaded: false,
    };

    let loader = RemoteContextLoader::new(super::client(config)?);
    let pb = term::spinner("Loading context...");
    let result = loader.load(&plan_id, &args.paths, &params).await;
    pb.finish_and_clear();
    let resp = result?;

    if resp.loaded == 0 {
        println!("{}", "Nothing was loaded (no matching files)".yellow());
    } else {
        println!(
            "{} Loaded {} context entries (~{} tokens)",
            "✅".green(),
            resp.loaded,
            resp.total_tokens
        );
    }
    Ok(())
}
