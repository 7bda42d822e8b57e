//! Per-(user, organization) configuration storage.
//!
//! The record holds the global context and the user's default plan config.
//! Backends implement the two record-level methods; the global-context and
//! plan-config operations are derived from them.

use crate::error::Result;
use crate::types::PlanConfig;

/// Stored configuration for one user within one organization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgUserConfig {
    /// Empty means "no global context"
    pub global_context: String,
    pub default_plan_config: Option<PlanConfig>,
}

pub trait ConfigStore: Send + Sync {
    /// Fetch the record, `None` if the pair has never been written.
    fn get_org_user_config(&self, user_id: &str, org_id: &str) -> Result<Option<OrgUserConfig>>;

    /// Insert or fully replace the record.
    fn update_org_user_config(
        &self,
        user_id: &str,
        org_id: &str,
        config: &OrgUserConfig,
    ) -> Result<()>;

    /// Global context, `None` when there is no record or the content is empty.
    fn get_global_context(&self, user_id: &str, org_id: &str) -> Result<Option<String>> {
        Ok(self
            .get_org_user_config(user_id, org_id)?
            .map(|c| c.global_context)
            .filter(|c| !c.is_empty()))
    }

    fn set_global_context(&self, user_id: &str, org_id: &str, content: &str) -> Result<()> {
        let mut config = self
            .get_org_user_config(user_id, org_id)?
            .unwrap_or_default();
        config.global_context = content.to_string();
        self.update_org_user_config(user_id, org_id, &config)
    }

    /// Empty the global context. A missing record is left missing.
    fn clear_global_context(&self, user_id: &str, org_id: &str) -> Result<()> {
        match self.get_org_user_config(user_id, org_id)? {
            Some(mut config) => {
                config.global_context.clear();
                self.update_org_user_config(user_id, org_id, &config)
            }
            None => Ok(()),
        }
    }

    /// The stored default plan config, or [`PlanConfig::default`].
    fn default_plan_config(&self, user_id: &str, org_id: &str) -> Result<PlanConfig> {
        Ok(self
            .get_org_user_config(user_id, org_id)?
            .and_then(|c| c.default_plan_config)
            .unwrap_or_default())
    }

    fn set_default_plan_config(
        &self,
        user_id: &str,
        org_id: &str,
        plan_config: &PlanConfig,
    ) -> Result<()> {
        let mut config = self
            .get_org_user_config(user_id, org_id)?
            .unwrap_or_default();
        config.default_plan_config = Some(plan_config.clone());
        self.update_org_user_config(user_id, org_id, &config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AutoMode;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<HashMap<(String, String), OrgUserConfig>>,
        writes: Mutex<usize>,
    }

    impl ConfigStore for MemoryStore {
        fn get_org_user_config(&self, user_id: &str, org_id: &str) -> Result<Option<OrgUserConfig>> {
            let records = self.records.lock().unwrap();
            Ok(records
                .get(&(user_id.to_string(), org_id.to_string()))
                .cloned())
        }

        fn update_org_user_config(
            &self,
            user_id: &str,
            org_id: &str,
            config: &OrgUserConfig,
        ) -> Result<()> {
            *self.writes.lock().unwrap() += 1;
            self.records
                .lock()
                .unwrap()
                .insert((user_id.to_string(), org_id.to_string()), config.clone());
            Ok(())
        }
    }

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::default();
        store.set_global_context("u1", "o1", "use tabs").unwrap();
        assert_eq!(
            store.get_global_context("u1", "o1").unwrap().as_deref(),
            Some("use tabs")
        );

        store.set_global_context("u1", "o1", "use spaces").unwrap();
        assert_eq!(
            store.get_global_context("u1", "o1").unwrap().as_deref(),
            Some("use spaces")
        );
    }

    #[test]
    fn test_scoped_by_user_and_org() {
        let store = MemoryStore::default();
        store.set_global_context("u1", "o1", "first").unwrap();
        assert_eq!(store.get_global_context("u1", "o2").unwrap(), None);
        assert_eq!(store.get_global_context("u2", "o1").unwrap(), None);
    }

    #[test]
    fn test_clear_then_get_is_absent() {
        let store = MemoryStore::default();
        store.set_global_context("u1", "o1", "notes").unwrap();
        store.clear_global_context("u1", "o1").unwrap();
        assert_eq!(store.get_global_context("u1", "o1").unwrap(), None);

        // Record survives with empty content
        let record = store.get_org_user_config("u1", "o1").unwrap().unwrap();
        assert_eq!(record.global_context, "");
    }

    #[test]
    fn test_clear_without_record_is_noop() {
        let store = MemoryStore::default();
        store.clear_global_context("u1", "o1").unwrap();
        assert_eq!(store.get_org_user_config("u1", "o1").unwrap(), None);
        assert_eq!(*store.writes.lock().unwrap(), 0);
    }

    #[test]
    fn test_empty_content_reads_as_absent() {
        let store = MemoryStore::default();
        store.set_global_context("u1", "o1", "").unwrap();
        assert_eq!(store.get_global_context("u1", "o1").unwrap(), None);
    }

    #[test]
    fn test_default_plan_config_preserves_global_context() {
        let store = MemoryStore::default();
        assert_eq!(
            store.default_plan_config("u1", "o1").unwrap(),
            PlanConfig::default()
        );

        store.set_global_context("u1", "o1", "notes").unwrap();
        let custom = PlanConfig {
            auto_mode: AutoMode::Full,
            auto_load_context: false,
            model_pack_name: "reasoning".to_string(),
        };
        store.set_default_plan_config("u1", "o1", &custom).unwrap();

        assert_eq!(store.default_plan_config("u1", "o1").unwrap(), custom);
        assert_eq!(
            store.get_global_context("u1", "o1").unwrap().as_deref(),
            Some("notes")
        );
    }
}
