//! Error types for planr-core.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using planr-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Kind tag carried by every [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Network failure or an unreadable response
    Transport,
    /// Malformed request or response body
    Serialization,
    /// Missing, invalid or expired credentials
    Unauthorized,
    /// The addressed resource does not exist
    NotFound,
    /// 5xx from the server
    Server,
    Other,
}

/// Error surfaced by the remote service.
///
/// Transport and serialization failures share this type so call sites
/// handle both the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{msg}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub msg: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, msg)
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Serialization, msg)
    }

    /// Prefix the message with the operation that failed, e.g. "error creating plan: ...".
    pub fn during(self, operation: &str) -> Self {
        Self {
            kind: self.kind,
            msg: format!("error {}: {}", operation, self.msg),
        }
    }
}

/// Core error types for planr operations
#[derive(Error, Debug)]
pub enum Error {
    // Remote errors
    #[error("{0}")]
    Api(#[from] ApiError),

    // Local state errors
    #[error("Error setting {what}: {source}")]
    Persist {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a planr project (no .planr directory found from {0:?})")]
    NoProject(PathBuf),

    #[error("No current plan. Run `planr new` first.")]
    NoCurrentPlan,

    // Context errors
    #[error("Error reading {what} {path:?}: {source}")]
    ReadFile {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Database errors
    #[cfg(feature = "db")]
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[cfg(feature = "db")]
    #[error("Database lock poisoned")]
    LockPoisoned,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a local persistence error
    pub fn persist(what: &'static str, source: std::io::Error) -> Self {
        Self::Persist { what, source }
    }

    /// Create a file read error
    pub fn read_file(what: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            what,
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_during_prefixes_operation() {
        let err = ApiError::transport("connection refused").during("creating plan");
        assert_eq!(err.kind, ApiErrorKind::Transport);
        assert_eq!(err.to_string(), "error creating plan: connection refused");
    }

    #[test]
    fn test_persist_error_message() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::persist("current plan", io);
        assert_eq!(err.to_string(), "Error setting current plan: denied");
    }

    #[test]
    fn test_api_error_converts_into_error() {
        let err: Error = ApiError::new(ApiErrorKind::Server, "boom").into();
        assert!(matches!(err, Error::Api(ref e) if e.kind == ApiErrorKind::Server));
    }
}
