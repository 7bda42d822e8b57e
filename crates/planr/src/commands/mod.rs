//! Command implementations for planr CLI.
//!
//! Each submodule implements the logic for a command group.

pub mod current;
pub mod global_context;
pub mod load;
pub mod new;
pub mod plan_config;

use anyhow::Result;
use planr_core::client::ApiClient;
use planr_core::project::ProjectDir;
use planr_core::Error;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;

/// API client for the configured server.
pub fn client(config: &Config) -> Result<Arc<ApiClient>> {
    Ok(Arc::new(ApiClient::new(&config.client_config())?))
}

pub fn current_dir() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

/// The project containing the working directory.
pub fn project_dir() -> Result<ProjectDir> {
    let cwd = current_dir()?;
    Ok(ProjectDir::discover(&cwd).ok_or(Error::NoProject(cwd))?)
}
