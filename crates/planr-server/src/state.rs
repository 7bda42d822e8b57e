//! Application state.

use planr_core::Database;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;

/// Shared application state
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Database connection
    pub db: Arc<Database>,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config, db: Database) -> Arc<Self> {
        Arc::new(Self {
            config: Arc::new(config),
            db: Arc::new(db),
            start_time: Instant::now(),
        })
    }
}
