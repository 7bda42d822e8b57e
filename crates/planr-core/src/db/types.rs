//! Database row types for planr-core.

use serde::{Deserialize, Serialize};

use crate::types::{ContextKind, PlanIdentity, Project};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProject {
    pub id: String,
    pub user_id: String,
    pub org_id: String,
    pub name: String,
    pub created_at: i64,
}

impl From<StoredProject> for Project {
    fn from(p: StoredProject) -> Self {
        Project {
            id: p.id,
            name: p.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPlan {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub org_id: String,
    pub name: String,
    pub created_at: i64,
}

impl From<StoredPlan> for PlanIdentity {
    fn from(p: StoredPlan) -> Self {
        PlanIdentity {
            id: p.id,
            name: p.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredContextEntry {
    pub id: String,
    pub plan_id: String,
    pub kind: ContextKind,
    pub name: String,
    pub body: String,
    pub auto_loaded: bool,
    pub created_at: i64,
}

/// CLI token row. The secret itself is never stored, only its digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliToken {
    pub id: String,
    pub user_id: String,
    pub org_id: String,
    pub name: String,
    pub created_at: i64,
    pub last_used_at: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewCliToken<'a> {
    pub user_id: &'a str,
    pub org_id: &'a str,
    pub name: &'a str,
    pub token_hash: &'a str,
}
