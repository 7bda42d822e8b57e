//! Shared types for planr-core.
//!
//! These types are the wire contract between the CLI and planr-server, and
//! are also used by the database layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Plan name shown when the operator does not pick one.
pub const DEFAULT_PLAN_NAME: &str = "draft";

/// Branch every new plan starts on.
pub const DEFAULT_BRANCH: &str = "main";

// ─────────────────────────────────────────────────────────────────────────────
// Plan Types
// ─────────────────────────────────────────────────────────────────────────────

/// How much of the plan workflow runs without operator confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AutoMode {
    None,
    Basic,
    Plus,
    #[default]
    Semi,
    Full,
}

impl AutoMode {
    pub const ALL: [AutoMode; 5] = [
        AutoMode::None,
        AutoMode::Basic,
        AutoMode::Plus,
        AutoMode::Semi,
        AutoMode::Full,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AutoMode::None => "none",
            AutoMode::Basic => "basic",
            AutoMode::Plus => "plus",
            AutoMode::Semi => "semi",
            AutoMode::Full => "full",
        }
    }

    /// Human-readable label for status output.
    pub fn label(&self) -> &'static str {
        match self {
            AutoMode::None => "None → step-by-step, no automation",
            AutoMode::Basic => "Basic → auto-continue plans",
            AutoMode::Plus => "Plus → auto-continue, auto-update context",
            AutoMode::Semi => "Semi-Auto → auto-load context",
            AutoMode::Full => "Full-Auto → auto-apply, auto-exec, auto-debug",
        }
    }
}

impl fmt::Display for AutoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AutoMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(AutoMode::None),
            "basic" => Ok(AutoMode::Basic),
            "plus" => Ok(AutoMode::Plus),
            "semi" | "semi-auto" => Ok(AutoMode::Semi),
            "full" | "full-auto" => Ok(AutoMode::Full),
            other => Err(format!(
                "unknown auto mode '{}' (expected one of: none, basic, plus, semi, full)",
                other
            )),
        }
    }
}

/// Configuration snapshot for a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default)]
    pub auto_mode: AutoMode,
    #[serde(default = "default_true")]
    pub auto_load_context: bool,
    #[serde(default = "default_model_pack")]
    pub model_pack_name: String,
}

fn default_true() -> bool {
    true
}

fn default_model_pack() -> String {
    "daily-driver".to_string()
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            auto_mode: AutoMode::default(),
            auto_load_context: default_true(),
            model_pack_name: default_model_pack(),
        }
    }
}

/// Result of plan creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanIdentity {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Context Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKind {
    Note,
    File,
    /// Definition-level outline of a source file
    Definitions,
}

impl ContextKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKind::Note => "note",
            ContextKind::File => "file",
            ContextKind::Definitions => "definitions",
        }
    }
}

impl FromStr for ContextKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "note" => Ok(ContextKind::Note),
            "file" => Ok(ContextKind::File),
            "definitions" => Ok(ContextKind::Definitions),
            other => Err(format!("unknown context kind '{}'", other)),
        }
    }
}

/// A single piece of context attached to a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub kind: ContextKind,
    pub name: String,
    pub body: String,
    /// Loaded automatically at plan creation rather than by the operator
    #[serde(default)]
    pub auto_loaded: bool,
}

impl ContextEntry {
    pub fn note(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: ContextKind::Note,
            name: name.into(),
            body: body.into(),
            auto_loaded: false,
        }
    }

    /// Rough token estimate (4 bytes per token).
    pub fn estimated_tokens(&self) -> usize {
        self.body.len().div_ceil(4)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request/Response Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CreatePlanRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub suppress_global_context: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalContextRequest {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalContextResponse {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadContextRequest {
    pub entries: Vec<ContextEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoadContextResponse {
    pub loaded: usize,
    pub total_tokens: usize,
}

/// Error body returned by planr-server for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
