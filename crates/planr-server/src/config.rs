//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listen address
pub const DEFAULT_BIND: &str = "127.0.0.1:8787";

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for server state
    pub server_dir: PathBuf,
    /// SQLite database path
    pub database_path: PathBuf,
    /// PID file path
    pub pid_file: PathBuf,
    /// Listen address
    pub bind: SocketAddr,
}

impl Config {
    /// Configuration rooted at `server_dir`
    pub fn in_dir(server_dir: PathBuf, bind: SocketAddr) -> Self {
        Self {
            database_path: server_dir.join("planr.db"),
            pid_file: server_dir.join("server.pid"),
            server_dir,
            bind,
        }
    }

    /// Load configuration from the environment
    ///
    /// Directory structure:
    /// ```text
    /// ~/.planr-server/          # or $PLANR_SERVER_DIR
    /// ├── planr.db              # Database
    /// └── server.pid            # PID file
    /// ```
    ///
    /// The listen address comes from `PLANR_BIND` (default `127.0.0.1:8787`).
    pub fn load() -> anyhow::Result<Self> {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        let server_dir = std::env::var("PLANR_SERVER_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".planr-server"));

        let bind = std::env::var("PLANR_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid PLANR_BIND address '{}': {}", bind, e))?;

        std::fs::create_dir_all(&server_dir)?;

        Ok(Self::in_dir(server_dir, bind))
    }
}
