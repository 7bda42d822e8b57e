//! Configuration management for planr.
//!
//! Configuration is loaded from multiple sources with precedence:
//! 1. Environment variables (PLANR_API_URL, PLANR_TOKEN)
//! 2. Config file ($PLANR_CONFIG or the platform config dir)
//! 3. Default values

use anyhow::{Context, Result};
use directories::ProjectDirs;
use planr_core::client::{ClientConfig, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// planr-server connection settings
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for planr-server
    #[serde(default = "default_api_url")]
    pub url: String,

    /// CLI token issued by `planr-server issue-token`
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://127.0.0.1:8787".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_overrides(
            std::env::var("PLANR_API_URL").ok(),
            std::env::var("PLANR_TOKEN").ok(),
        );
        Ok(config)
    }

    /// Load the config file at `path`, or defaults when it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Apply environment overrides. Empty values are ignored.
    pub fn apply_overrides(&mut self, url: Option<String>, token: Option<String>) {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            self.api.url = url;
        }
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.api.token = Some(token);
        }
    }

    /// Get the config file path.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("PLANR_CONFIG") {
            PathBuf::from(path)
        } else if let Some(proj_dirs) = ProjectDirs::from("dev", "planr", "planr") {
            proj_dirs.config_dir().join("config.toml")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".planr")
                .join("config.toml")
        }
    }

    /// Connection settings for the API client.
    pub fn client_config(&self) -> ClientConfig {
        let mut client = ClientConfig::new(&self.api.url);
        client.timeout = Duration::from_secs(self.api.timeout_secs);
        if let Some(ref token) = self.api.token {
            client = client.with_token(token);
        }
        client
    }
}
