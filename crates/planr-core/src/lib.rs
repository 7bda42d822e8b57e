//! planr-core - Core library for planr
//!
//! This crate provides shared functionality between the planr CLI and planr-server:
//!
//! - **types**: Wire and domain types (plans, plan config, context entries)
//! - **remote**: The `RemoteService` API and its HTTP client (`client` feature)
//! - **store**: Per-user configuration storage, SQLite-backed with the `db` feature
//! - **orchestrator**: Concurrent plan bootstrap and the post-creation cascade
//! - **context**: Collecting notes, files and definitions for a plan
//! - **project**: Local `.planr` state (project record, current plan pointers)

pub mod context;
pub mod error;
pub mod orchestrator;
pub mod project;
pub mod remote;
pub mod store;
pub mod types;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "db")]
pub mod db;

#[cfg(test)]
mod testing;

// Re-export commonly used types
#[cfg(feature = "client")]
pub use client::{ApiClient, ClientConfig};
#[cfg(feature = "db")]
pub use db::Database;
pub use error::{ApiError, ApiErrorKind, Error, Result};
pub use remote::RemoteService;
pub use store::ConfigStore;
