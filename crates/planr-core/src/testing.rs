//! In-memory fakes shared by the unit tests.

use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::context::{collect_entries, ContextLoader, LoadParams};
use crate::error::{ApiError, Result};
use crate::project::PointerStore;
use crate::remote::{ApiResult, RemoteService};
use crate::types::*;

/// Ordered record of side effects, shared between fakes.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn record(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub struct FakeRemote {
    pub log: EventLog,
    pub config: PlanConfig,
    pub create_error: Option<ApiError>,
    pub config_error: Option<ApiError>,
    pub global_context: Mutex<Option<String>>,
    pub create_requests: Mutex<Vec<CreatePlanRequest>>,
    pub loaded: Mutex<Vec<(String, Vec<ContextEntry>)>>,
}

impl FakeRemote {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            config: PlanConfig::default(),
            create_error: None,
            config_error: None,
            global_context: Mutex::new(None),
            create_requests: Mutex::new(Vec::new()),
            loaded: Mutex::new(Vec::new()),
        }
    }

    pub fn with_config(mut self, config: PlanConfig) -> Self {
        self.config = config;
        self
    }
}

#[async_trait]
impl RemoteService for FakeRemote {
    async fn create_project(&self, name: &str) -> ApiResult<Project> {
        self.log.record(format!("create_project:{}", name));
        Ok(Project {
            id: "proj-1".to_string(),
            name: name.to_string(),
        })
    }

    async fn create_plan(
        &self,
        _project_id: &str,
        req: &CreatePlanRequest,
    ) -> ApiResult<PlanIdentity> {
        self.create_requests.lock().unwrap().push(req.clone());
        if let Some(ref err) = self.create_error {
            return Err(err.clone());
        }
        self.log.record("create_plan");
        Ok(PlanIdentity {
            id: "plan-1".to_string(),
            name: if req.name.is_empty() {
                DEFAULT_PLAN_NAME.to_string()
            } else {
                req.name.clone()
            },
        })
    }

    async fn get_default_plan_config(&self) -> ApiResult<PlanConfig> {
        if let Some(ref err) = self.config_error {
            return Err(err.clone());
        }
        self.log.record("get_default_plan_config");
        Ok(self.config.clone())
    }

    async fn update_default_plan_config(&self, config: &PlanConfig) -> ApiResult<PlanConfig> {
        Ok(config.clone())
    }

    async fn get_global_context(&self) -> ApiResult<Option<String>> {
        Ok(self.global_context.lock().unwrap().clone())
    }

    async fn set_global_context(&self, content: &str) -> ApiResult<()> {
        *self.global_context.lock().unwrap() = Some(content.to_string());
        Ok(())
    }

    async fn clear_global_context(&self) -> ApiResult<()> {
        *self.global_context.lock().unwrap() = None;
        Ok(())
    }

    async fn load_context(
        &self,
        plan_id: &str,
        req: &LoadContextRequest,
    ) -> ApiResult<LoadContextResponse> {
        self.log.record(format!("load_context:{}", req.entries.len()));
        self.loaded
            .lock()
            .unwrap()
            .push((plan_id.to_string(), req.entries.clone()));
        Ok(LoadContextResponse {
            loaded: req.entries.len(),
            total_tokens: req.entries.iter().map(|e| e.estimated_tokens()).sum(),
        })
    }
}

/// Pointer store that only records writes; optionally fails one of them.
pub struct RecordingPointers {
    pub log: EventLog,
    pub fail_branch: bool,
}

impl PointerStore for RecordingPointers {
    fn write_current_plan(&self, plan_id: &str) -> io::Result<()> {
        self.log.record(format!("write_current_plan:{}", plan_id));
        Ok(())
    }

    fn write_current_branch(&self, branch: &str) -> io::Result<()> {
        if self.fail_branch {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.log.record(format!("write_current_branch:{}", branch));
        Ok(())
    }
}

/// Loader that records each call and the entries it would send.
pub struct RecordingLoader {
    pub log: EventLog,
    pub calls: Mutex<Vec<(Vec<PathBuf>, LoadParams)>>,
}

impl RecordingLoader {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ContextLoader for RecordingLoader {
    async fn load(
        &self,
        _plan_id: &str,
        paths: &[PathBuf],
        params: &LoadParams,
    ) -> Result<LoadContextResponse> {
        self.log.record(format!(
            "load:{}",
            if params.auto_loaded { "auto" } else { "manual" }
        ));
        self.calls
            .lock()
            .unwrap()
            .push((paths.to_vec(), params.clone()));
        let entries = if params.note.is_some() {
            collect_entries(&[], params)?
        } else {
            Vec::new()
        };
        Ok(LoadContextResponse {
            loaded: entries.len(),
            total_tokens: entries.iter().map(|e| e.estimated_tokens()).sum(),
        })
    }
}
