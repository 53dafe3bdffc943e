//! Site state exported as a JSON document.
//!
//! A snapshot carries everything the audit reads except mail delivery:
//!
//! ```json
//! {
//!   "site_uri": "https://shop.fclmedia.com",
//!   "platform": { "framework_version": "7.98", "runtime_version": "8.1.2",
//!                 "memory_limit": "256M", "database_version": "MySQL 8.0.36" },
//!   "variables": { "cache": 1, "cron_last": 1700000000 },
//!   "components": [ { "name": "syslog", "type": "module", "status": 1, "schema_version": 7000 } ],
//!   "users": [ { "uid": 1, "status": 0 } ],
//!   "index_bundles": [ { "env_id": "solr", "entity_type": "node", "bundle": "product" } ],
//!   "views": [ { "name": "frontpage", "displays": { "page": { "access": { "type": "none" } } } } ]
//! }
//! ```
//!
//! `index_bundles` absent means the search index table does not exist;
//! an empty array means it exists and is empty.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::host::{
    Component, ComponentKind, ConfigStore, Database, HostResult, INDEX_BUNDLES_TABLE, IndexBundle,
    ModuleRegistry, Platform, ViewDefinition, ViewRegistry,
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSnapshot {
    #[serde(default)]
    pub site_uri: String,
    #[serde(default)]
    pub platform: PlatformInfo,
    #[serde(default)]
    pub variables: BTreeMap<String, Value>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub users: Vec<UserRow>,
    #[serde(default)]
    pub index_bundles: Option<Vec<IndexBundle>>,
    #[serde(default)]
    pub views: Vec<ViewDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlatformInfo {
    #[serde(default)]
    pub framework_version: String,
    #[serde(default)]
    pub runtime_version: String,
    #[serde(default)]
    pub memory_limit: String,
    #[serde(default)]
    pub database_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRow {
    pub uid: u64,
    pub status: i64,
}

impl SiteSnapshot {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        let snapshot: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            variables = snapshot.variables.len(),
            components = snapshot.components.len(),
            views = snapshot.views.len(),
            "loaded site snapshot"
        );
        Ok(snapshot)
    }

    pub fn site_uri(&self) -> &str {
        &self.site_uri
    }
}

impl ConfigStore for SiteSnapshot {
    fn get(&self, name: &str) -> HostResult<Option<Value>> {
        Ok(self.variables.get(name).cloned())
    }
}

impl ModuleRegistry for SiteSnapshot {
    fn exists(&self, name: &str) -> HostResult<bool> {
        Ok(self
            .components
            .iter()
            .any(|c| c.kind == ComponentKind::Module && c.name == name && c.enabled()))
    }
}

impl Database for SiteSnapshot {
    fn table_exists(&self, table: &str) -> HostResult<bool> {
        Ok(match table {
            INDEX_BUNDLES_TABLE => self.index_bundles.is_some(),
            _ => false,
        })
    }

    fn components(&self, kind: ComponentKind) -> HostResult<Vec<Component>> {
        let mut rows: Vec<_> = self
            .components
            .iter()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    fn user_active(&self, uid: u64) -> HostResult<Option<bool>> {
        Ok(self.users.iter().find(|u| u.uid == uid).map(|u| u.status != 0))
    }

    fn index_bundles(&self, env_id: &str) -> HostResult<Vec<IndexBundle>> {
        Ok(self
            .index_bundles
            .iter()
            .flatten()
            .filter(|b| b.env_id == env_id)
            .cloned()
            .collect())
    }

    fn version(&self) -> HostResult<String> {
        Ok(self.platform.database_version.clone())
    }
}

impl ViewRegistry for SiteSnapshot {
    fn views(&self) -> HostResult<Vec<ViewDefinition>> {
        Ok(self.views.clone())
    }
}

impl Platform for SiteSnapshot {
    fn framework_version(&self) -> HostResult<String> {
        Ok(self.platform.framework_version.clone())
    }

    fn runtime_version(&self) -> HostResult<String> {
        Ok(self.platform.runtime_version.clone())
    }

    fn memory_limit(&self) -> HostResult<String> {
        Ok(self.platform.memory_limit.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample() -> SiteSnapshot {
        serde_json::from_value(json!({
            "site_uri": "https://shop.fclmedia.com",
            "variables": { "cache": 1 },
            "components": [
                { "name": "views", "type": "module", "status": 1, "schema_version": 7301 },
                { "name": "devel", "type": "module", "status": 0, "schema_version": 7001 },
                { "name": "bartik", "type": "theme", "status": 1 }
            ],
            "users": [ { "uid": 1, "status": 0 } ],
            "index_bundles": [
                { "env_id": "solr", "entity_type": "node", "bundle": "product" },
                { "env_id": "staging", "entity_type": "node", "bundle": "page" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn module_registry_only_reports_enabled_modules() {
        let snapshot = sample();
        assert!(snapshot.exists("views").unwrap());
        assert!(!snapshot.exists("devel").unwrap());
        assert!(!snapshot.exists("bartik").unwrap());
    }

    #[test]
    fn theme_rows_default_to_uninstalled_schema() {
        let themes = sample().components(ComponentKind::Theme).unwrap();
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].schema_version, -1);
    }

    #[test]
    fn index_table_presence_follows_field() {
        let mut snapshot = sample();
        assert!(snapshot.table_exists(INDEX_BUNDLES_TABLE).unwrap());
        assert_eq!(snapshot.index_bundles("solr").unwrap().len(), 1);

        snapshot.index_bundles = None;
        assert!(!snapshot.table_exists(INDEX_BUNDLES_TABLE).unwrap());
        assert!(snapshot.index_bundles("solr").unwrap().is_empty());
    }

    #[test]
    fn unknown_user_is_none() {
        let snapshot = sample();
        assert_eq!(snapshot.user_active(1).unwrap(), Some(false));
        assert_eq!(snapshot.user_active(42).unwrap(), None);
    }

    #[test]
    fn load_reads_file_and_reports_parse_errors() {
        let mut good = NamedTempFile::new().unwrap();
        write!(good, r#"{{"site_uri": "https://example.com"}}"#).unwrap();
        let snapshot = SiteSnapshot::load(good.path()).unwrap();
        assert_eq!(snapshot.site_uri(), "https://example.com");

        let mut bad = NamedTempFile::new().unwrap();
        write!(bad, r#"{{"unexpected": true}}"#).unwrap();
        let err = SiteSnapshot::load(bad.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse snapshot"));
    }
}
