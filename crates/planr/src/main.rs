//! planr - plan-based coding sessions from the terminal
//!
//! Starts plans against planr-server, manages the global context attached to
//! new plans, and loads local files into the current plan.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use planr_core::orchestrator::SessionMode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod config;
mod term;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize tracing (stderr keeps command output clean)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("planr=warn".parse()?))
        .init();

    let cli = Cli::parse();
    let session = if cli.repl || repl_from_env() {
        SessionMode::Repl
    } else {
        SessionMode::Command
    };

    // Load configuration
    let config = config::Config::load()?;

    // Execute command
    match cli.command {
        Commands::GlobalContext(cmd) => commands::global_context::execute(cmd, &config).await,
        Commands::New(args) => commands::new::execute(args, session, &config).await,
        Commands::Load(args) => commands::load::execute(args, &config).await,
        Commands::Config(cmd) => commands::plan_config::execute(cmd, &config).await,
        Commands::Current => commands::current::execute().await,
    }
}

fn repl_from_env() -> bool {
    std::env::var("PLANR_REPL")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
