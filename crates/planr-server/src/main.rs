//! planr-server - planr backend server
//!
//! REST API for projects, plans, plan context and per-user global context.

use clap::{Parser, Subcommand};
use planr_core::Database;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod error;
mod middleware;
mod routes;
mod state;
#[cfg(test)]
mod testing;
mod tokens;

#[derive(Parser)]
#[command(name = "planr-server", version, about = "planr backend server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the API server (default)
    Serve {
        /// Listen address (overrides PLANR_BIND)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Issue a CLI token for a user within an organization
    IssueToken {
        #[arg(long)]
        user: String,
        #[arg(long)]
        org: String,
        /// Label for the token
        #[arg(long, default_value = "cli")]
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("planr_server=info".parse()?))
        .init();

    let cli = Cli::parse();
    let mut config = config::Config::load()?;

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            serve(config).await
        }
        Command::IssueToken { user, org, name } => {
            let db = Database::open_path(&config.database_path)?;
            let (token, raw_key) = tokens::issue_token(&db, &user, &org, &name)?;
            println!("Token '{}' ({}) for {} in {}:", token.name, token.id, user, org);
            println!("{}", raw_key);
            Ok(())
        }
    }
}

async fn serve(config: config::Config) -> anyhow::Result<()> {
    info!("planr-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Server directory: {:?}", config.server_dir);

    // Check for existing server
    if config.pid_file.exists() {
        let pid_str = std::fs::read_to_string(&config.pid_file)?;
        let pid: i32 = pid_str.trim().parse()?;

        // Check if process is still running
        if process_exists(pid) {
            anyhow::bail!("Server already running with PID {}", pid);
        }

        info!("Cleaning up stale PID file from previous crash");
        let _ = std::fs::remove_file(&config.pid_file);
    }

    let db = Database::open_path(&config.database_path)?;
    info!("Database opened at {:?}", config.database_path);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    let addr = listener.local_addr()?;
    std::fs::write(&config.pid_file, std::process::id().to_string())?;

    let pid_file = config.pid_file.clone();
    let app = routes::create_router(state::AppState::new(config, db));

    info!("Listening on http://{}", addr);
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    let _ = std::fs::remove_file(&pid_file);
    result?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutting down...");
}

/// Check if a process exists by PID
fn process_exists(pid: i32) -> bool {
    // On Unix, sending signal 0 checks if process exists
    unsafe { libc::kill(pid, 0) == 0 }
}
