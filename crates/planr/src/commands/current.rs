//! Show the current plan pointers.

use anyhow::Result;
use colored::Colorize;
use planr_core::types::DEFAULT_BRANCH;

pub async fn execute() -> Result<()> {
    let dir = super::project_dir()?;

    let Some(plan_id) = dir.current_plan()? else {
        println!("No current plan. Run `planr new` to start one.");
        return Ok(());
    };
    let branch = dir.current_branch()?.unwrap_or_else(|| DEFAULT_BRANCH.to_string());

    if let Some(project) = dir.read_project()? {
        println!("  {} {} ({})", "Project:".dimmed(), project.name, project.id);
    }
    println!("  {} {}", "Plan:".dimmed(), plan_id.bold());
    println!("  {} {}", "Branch:".dimmed(), branch);
    Ok(())
}
