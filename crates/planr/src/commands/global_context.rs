//! Global context commands.
//!
//! The global context is a free-text note stored per user and organization
//! and attached to every new plan unless `new` overrides it.

use anyhow::{Context, Result};
use clap::CommandFactory;
use colored::Colorize;
use planr_core::RemoteService;
use std::io::Read;
use std::path::Path;

use crate::cli::{Cli, GlobalContextAction, GlobalContextCommand};
use crate::config::Config;
use crate::term;

pub async fn execute(cmd: GlobalContextCommand, config: &Config) -> Result<()> {
    match cmd.action {
        Some(GlobalContextAction::Set { file }) => set(file.as_deref(), config).await,
        Some(GlobalContextAction::Show) => show(config).await,
        Some(GlobalContextAction::Clear) => clear(config).await,
        None => print_usage(),
    }
}

fn print_usage() -> Result<()> {
    let mut cmd = Cli::command();
    if let Some(sub) = cmd.find_subcommand_mut("global-context") {
        sub.print_help()?;
    }
    Ok(())
}

/// Read the new content from `file`, or from `stdin` when no file is given.
fn read_content(file: Option<&Path>, mut stdin: impl Read) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Error reading global context file {}", path.display())),
        None => {
            let mut content = String::new();
            stdin
                .read_to_string(&mut content)
                .context("Error reading global context from stdin")?;
            Ok(content)
        }
    }
}

fn check_content(content: &str) -> Result<()> {
    if content.is_empty() {
        anyhow::bail!("Global context is empty; use `planr global-context clear` to remove it");
    }
    Ok(())
}

/// Text printed by `show`.
fn render_global_context(content: Option<&str>) -> String {
    match content {
        Some(content) => format!(
            "{}\n================\n{}",
            "Global Context:".bold(),
            content
        ),
        None => "No global context set".to_string(),
    }
}

async fn set(file: Option<&Path>, config: &Config) -> Result<()> {
    let content = read_content(file, std::io::stdin())?;
    check_content(&content)?;

    let client = super::client(config)?;
    let pb = term::spinner("Updating global context...");
    let result = client.set_global_context(&content).await;
    pb.finish_and_clear();
    result.map_err(|e| e.during("setting global context"))?;

    println!("{}", "✓ Global context updated successfully".green());
    Ok(())
}

async fn show(config: &Config) -> Result<()> {
    let client = super::client(config)?;
    let content = client
        .get_global_context()
        .await
        .map_err(|e| e.during("getting global context"))?;

    println!("{}", render_global_context(content.as_deref()));
    Ok(())
}

async fn clear(config: &Config) -> Result<()> {
    let client = super::client(config)?;
    client
        .clear_global_context()
        .await
        .map_err(|e| e.during("clearing global context"))?;

    println!("{}", "✓ Global context cleared".green());
    Ok(())
}
