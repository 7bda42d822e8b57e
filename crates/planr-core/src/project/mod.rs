//! Local project state and plan pointers.
//!
//! Each working tree that uses planr has a `.planr/` directory:
//!
//! ```text
//! .planr/
//! ├── project.toml      # Server-side project id and name
//! ├── current-plan      # Id of the selected plan
//! └── current-branch    # Branch of the selected plan
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::remote::RemoteService;
use crate::types::Project;

/// Name of the per-project state directory
pub const STATE_DIR: &str = ".planr";

const PROJECT_FILE: &str = "project.toml";
const CURRENT_PLAN_FILE: &str = "current-plan";
const CURRENT_BRANCH_FILE: &str = "current-branch";

/// Destination for the "current plan" and "current branch" pointers.
pub trait PointerStore: Send + Sync {
    fn write_current_plan(&self, plan_id: &str) -> io::Result<()>;

    fn write_current_branch(&self, branch: &str) -> io::Result<()>;
}

/// Contents of `.planr/project.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
}

impl From<Project> for ProjectRecord {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
        }
    }
}

/// A working tree with a `.planr/` state directory.
#[derive(Debug, Clone)]
pub struct ProjectDir {
    root: PathBuf,
}

impl ProjectDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walk up from `start` looking for a `.planr/` directory.
    pub fn discover(start: &Path) -> Option<Self> {
        let mut current = start.to_path_buf();
        loop {
            if current.join(STATE_DIR).is_dir() {
                return Some(Self::new(current));
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn state_dir(&self) -> PathBuf {
        self.root.join(STATE_DIR)
    }

    pub fn read_project(&self) -> Result<Option<ProjectRecord>> {
        let path = self.state_dir().join(PROJECT_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(toml::from_str(&content)?))
    }

    pub fn write_project(&self, project: &ProjectRecord) -> Result<()> {
        fs::create_dir_all(self.state_dir())?;
        let content = toml::to_string_pretty(project)?;
        fs::write(self.state_dir().join(PROJECT_FILE), content)?;
        Ok(())
    }

    pub fn current_plan(&self) -> Result<Option<String>> {
        self.read_pointer(CURRENT_PLAN_FILE)
    }

    pub fn current_branch(&self) -> Result<Option<String>> {
        self.read_pointer(CURRENT_BRANCH_FILE)
    }

    /// Current plan id, or [`Error::NoCurrentPlan`].
    pub fn require_current_plan(&self) -> Result<String> {
        self.current_plan()?.ok_or(Error::NoCurrentPlan)
    }

    fn read_pointer(&self, file: &str) -> Result<Option<String>> {
        let path = self.state_dir().join(file);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)?.trim().to_string();
        Ok((!value.is_empty()).then_some(value))
    }

    fn write_pointer(&self, file: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(self.state_dir())?;
        fs::write(self.state_dir().join(file), value)
    }
}

impl PointerStore for ProjectDir {
    fn write_current_plan(&self, plan_id: &str) -> io::Result<()> {
        self.write_pointer(CURRENT_PLAN_FILE, plan_id)
    }

    fn write_current_branch(&self, branch: &str) -> io::Result<()> {
        self.write_pointer(CURRENT_BRANCH_FILE, branch)
    }
}

/// Find the project for `cwd`, creating it on the server when none exists yet.
///
/// A new project is named after the directory and rooted at `cwd`.
pub async fn resolve_or_create_project(
    remote: &dyn RemoteService,
    cwd: &Path,
) -> Result<(ProjectDir, ProjectRecord)> {
    if let Some(dir) = ProjectDir::discover(cwd) {
        if let Some(record) = dir.read_project()? {
            debug!("Using project {} at {:?}", record.id, dir.root());
            return Ok((dir, record));
        }
    }

    let name = cwd
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string());

    let project = remote
        .create_project(&name)
        .await
        .map_err(|e| e.during("creating project"))?;
    info!("Created project {} ({})", project.name, project.id);

    let dir = ProjectDir::new(cwd);
    let record = ProjectRecord::from(project);
    dir.write_project(&record)?;

    Ok((dir, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_pointers_round_trip() {
        let temp = tempdir().expect("Failed to create temp dir");
        let dir = ProjectDir::new(temp.path());

        assert_eq!(dir.current_plan().unwrap(), None);

        dir.write_current_plan("plan-1").unwrap();
        dir.write_current_branch("main").unwrap();

        assert_eq!(dir.current_plan().unwrap(), Some("plan-1".to_string()));
        assert_eq!(dir.current_branch().unwrap(), Some("main".to_string()));
    }

    #[test]
    fn test_require_current_plan_without_pointer() {
        let temp = tempdir().expect("Failed to create temp dir");
        let dir = ProjectDir::new(temp.path());
        assert!(matches!(dir.require_current_plan(), Err(Error::NoCurrentPlan)));
    }

    #[test]
    fn test_discover_walks_up() {
        let temp = tempdir().expect("Failed to create temp dir");
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(temp.path().join(STATE_DIR)).unwrap();

        let found = ProjectDir::discover(&nested).expect("project should be found");
        assert_eq!(found.root(), temp.path());
    }

    #[test]
    fn test_project_record_save_and_load() {
        let temp = tempdir().expect("Failed to create temp dir");
        let dir = ProjectDir::new(temp.path());
        let record = ProjectRecord {
            id: "proj-1".to_string(),
            name: "demo".to_string(),
        };

        dir.write_project(&record).unwrap();
        assert!(temp.path().join(STATE_DIR).join(PROJECT_FILE).exists());
        assert_eq!(dir.read_project().unwrap(), Some(record));
    }
}
