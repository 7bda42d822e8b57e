//! SQLite storage for planr-server.
//!
//! Holds per-(user, organization) configuration, projects, plans with their
//! context entries, and CLI token digests. The schema is created on open.

pub mod types;

pub use types::*;

use crate::error::{Error, Result};
use crate::store::{ConfigStore, OrgUserConfig};
use crate::types::{ContextEntry, ContextKind, PlanConfig};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS org_user_config (
    user_id TEXT NOT NULL,
    org_id TEXT NOT NULL,
    global_context TEXT NOT NULL DEFAULT '',
    default_plan_config TEXT,
    updated_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, org_id)
);

CREATE TABLE IF NOT EXISTS project (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    org_id TEXT NOT NULL,
    name TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS plan (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL REFERENCES project(id) ON DELETE CASCADE,
    user_id TEXT NOT NULL,
    org_id TEXT NOT NULL,
    name TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS context_entry (
    id TEXT PRIMARY KEY,
    plan_id TEXT NOT NULL REFERENCES plan(id) ON DELETE CASCADE,
    kind TEXT NOT NULL,
    name TEXT NOT NULL,
    body TEXT NOT NULL,
    auto_loaded INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_context_entry_plan ON context_entry(plan_id);

CREATE TABLE IF NOT EXISTS cli_token (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    org_id TEXT NOT NULL,
    name TEXT NOT NULL,
    token_hash TEXT NOT NULL UNIQUE,
    created_at INTEGER NOT NULL,
    last_used_at INTEGER
);
";

/// Database connection wrapper.
///
/// Thread-safe via internal Mutex. All database operations acquire the lock.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database at `path` and apply the schema
    pub fn open_path(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path).map_err(Error::Database)?;
        debug!("Opened database at {}", path.display());
        Self::init(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(Error::Database)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Check database connectivity
    pub fn ping(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        conn.execute_batch("SELECT 1").map_err(Error::Database)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Project Operations
    // ─────────────────────────────────────────────────────────────────────────

    pub fn create_project(&self, user_id: &str, org_id: &str, name: &str) -> Result<StoredProject> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().timestamp_millis();

        conn.execute(
            "INSERT INTO project (id, user_id, org_id, name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, user_id, org_id, name, now],
        )?;

        Ok(StoredProject {
            id,
            user_id: user_id.to_string(),
            org_id: org_id.to_string(),
            name: name.to_string(),
            created_at: now,
        })
    }

    pub fn get_project(&self, project_id: &str) -> Result<Option<StoredProject>> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, org_id, name, created_at FROM project WHERE id = ?1",
        )?;

        Ok(stmt
            .query_row(params![project_id], |row| {
                Ok(StoredProject {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    org_id: row.get(2)?,
                    name: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })
            .optional()?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Plan Operations
    // ─────────────────────────────────────────────────────────────────────────

    pub fn create_plan(&self, project: &StoredProject, name: &str) -> Result<StoredPlan> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().timestamp_millis();

        conn.execute(
            "INSERT INTO plan (id, project_id, user_id, org_id, name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![id, project.id, project.user_id, project.org_id, name, now],
        )?;

        Ok(StoredPlan {
            id,
            project_id: project.id.clone(),
            user_id: project.user_id.clone(),
            org_id: project.org_id.clone(),
            name: name.to_string(),
            created_at: now,
        })
    }

    pub fn get_plan(&self, plan_id: &str) -> Result<Option<StoredPlan>> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id, project_id, user_id, org_id, name, created_at FROM plan WHERE id = ?1",
        )?;

        Ok(stmt
            .query_row(params![plan_id], |row| {
                Ok(StoredPlan {
                    id: row.get(0)?,
                    project_id: row.get(1)?,
                    user_id: row.get(2)?,
                    org_id: row.get(3)?,
                    name: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })
            .optional()?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Context Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Attach entries to a plan in one transaction. Returns the number inserted.
    pub fn insert_context_entries(&self, plan_id: &str, entries: &[ContextEntry]) -> Result<usize> {
        let mut conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let now = chrono::Utc::now().timestamp_millis();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO context_entry (id, plan_id, kind, name, body, auto_loaded, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for entry in entries {
                stmt.execute(params![
                    uuid::Uuid::new_v4().to_string(),
                    plan_id,
                    entry.kind.as_str(),
                    entry.name,
                    entry.body,
                    entry.auto_loaded,
                    now,
                ])?;
            }
        }
        tx.commit()?;
        Ok(entries.len())
    }

    pub fn list_context_entries(&self, plan_id: &str) -> Result<Vec<StoredContextEntry>> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id, plan_id, kind, name, body, auto_loaded, created_at
             FROM context_entry WHERE plan_id = ?1 ORDER BY created_at, rowid",
        )?;

        let entries = stmt
            .query_map(params![plan_id], Self::map_context_entry)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    fn map_context_entry(row: &rusqlite::Row) -> rusqlite::Result<StoredContextEntry> {
        let kind: String = row.get(2)?;
        let kind = kind.parse::<ContextKind>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, e.into())
        })?;
        Ok(StoredContextEntry {
            id: row.get(0)?,
            plan_id: row.get(1)?,
            kind,
            name: row.get(3)?,
            body: row.get(4)?,
            auto_loaded: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // CLI Token Operations
    // ─────────────────────────────────────────────────────────────────────────

    pub fn create_cli_token(&self, token: &NewCliToken<'_>) -> Result<CliToken> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().timestamp_millis();

        conn.execute(
            "INSERT INTO cli_token (id, user_id, org_id, name, token_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![id, token.user_id, token.org_id, token.name, token.token_hash, now],
        )?;

        Ok(CliToken {
            id,
            user_id: token.user_id.to_string(),
            org_id: token.org_id.to_string(),
            name: token.name.to_string(),
            created_at: now,
            last_used_at: None,
        })
    }

    /// Look up a token by digest and mark it used
    pub fn find_cli_token_by_hash(&self, token_hash: &str) -> Result<Option<CliToken>> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let token = conn
            .query_row(
                "SELECT id, user_id, org_id, name, created_at, last_used_at
                 FROM cli_token WHERE token_hash = ?1",
                params![token_hash],
                |row| {
                    Ok(CliToken {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        org_id: row.get(2)?,
                        name: row.get(3)?,
                        created_at: row.get(4)?,
                        last_used_at: row.get(5)?,
                    })
                },
            )
            .optional()?;

        if let Some(ref t) = token {
            conn.execute(
                "UPDATE cli_token SET last_used_at = ?1 WHERE id = ?2",
                params![chrono::Utc::now().timestamp_millis(), t.id],
            )?;
        }

        Ok(token)
    }
}

impl ConfigStore for Database {
    fn get_org_user_config(&self, user_id: &str, org_id: &str) -> Result<Option<OrgUserConfig>> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let row: Option<(String, Option<String>)> = conn
            .query_row(
                "SELECT global_context, default_plan_config
                 FROM org_user_config WHERE user_id = ?1 AND org_id = ?2",
                params![user_id, org_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((global_context, plan_config)) = row else {
            return Ok(None);
        };

        let default_plan_config = plan_config
            .map(|json| serde_json::from_str::<PlanConfig>(&json))
            .transpose()?;

        Ok(Some(OrgUserConfig {
            global_context,
            default_plan_config,
        }))
    }

    fn update_org_user_config(
        &self,
        user_id: &str,
        org_id: &str,
        config: &OrgUserConfig,
    ) -> Result<()> {
        let plan_config = config
            .default_plan_config
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        conn.execute(
            "INSERT INTO org_user_config (user_id, org_id, global_context, default_plan_config, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(user_id, org_id) DO UPDATE SET
                global_context = excluded.global_context,
                default_plan_config = excluded.default_plan_config,
                updated_at = excluded.updated_at",
            params![
                user_id,
                org_id,
                config.global_context,
                plan_config,
                chrono::Utc::now().timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    // Each write touches only its own column

    fn set_global_context(&self, user_id: &str, org_id: &str, content: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        conn.execute(
            "INSERT INTO org_user_config (user_id, org_id, global_context, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id, org_id) DO UPDATE SET
                global_context = excluded.global_context,
                updated_at = excluded.updated_at",
            params![user_id, org_id, content, chrono::Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }

    fn clear_global_context(&self, user_id: &str, org_id: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let changed = conn.execute(
            "UPDATE org_user_config SET global_context = '', updated_at = ?3
             WHERE user_id = ?1 AND org_id = ?2",
            params![user_id, org_id, chrono::Utc::now().timestamp_millis()],
        )?;
        debug!("Cleared global context for {}/{} ({} rows)", user_id, org_id, changed);
        Ok(())
    }

    fn set_default_plan_config(
        &self,
        user_id: &str,
        org_id: &str,
        plan_config: &PlanConfig,
    ) -> Result<()> {
        let json = serde_json::to_string(plan_config)?;
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        conn.execute(
            "INSERT INTO org_user_config (user_id, org_id, default_plan_config, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id, org_id) DO UPDATE SET
                default_plan_config = excluded.default_plan_config,
                updated_at = excluded.updated_at",
            params![user_id, org_id, json, chrono::Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }
}
