//! Capability interfaces onto the audited site.
//!
//! The audit never talks to the content-management host directly. Each
//! kind of state it reads (configuration variables, module status,
//! database tables, saved views, platform facts) and the mail transport
//! it writes to sit behind a narrow trait, bundled in [`Host`].
//!
//! Backends:
//! - [`snapshot::SiteSnapshot`]: a JSON export of the site state
//! - [`sqlite::SqliteDatabase`]: the site's SQLite database
//! - [`sendmail::SendmailTransport`]: a `sendmail -t` compatible binary

pub mod sendmail;
pub mod snapshot;
pub mod sqlite;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HostError;

pub type HostResult<T> = Result<T, HostError>;

/// Table the search integration records indexed bundles in.
pub const INDEX_BUNDLES_TABLE: &str = "apachesolr_index_bundles";

/// Configuration variable store.
pub trait ConfigStore {
    /// Value of a variable, `None` when unset.
    fn get(&self, name: &str) -> HostResult<Option<Value>>;
}

/// Module registry.
pub trait ModuleRegistry {
    /// Whether the named module is installed and enabled.
    fn exists(&self, name: &str) -> HostResult<bool>;
}

/// Simple filtered reads against the site database.
pub trait Database {
    fn table_exists(&self, table: &str) -> HostResult<bool>;

    /// Rows of the installed components table for one component kind,
    /// ordered by name.
    fn components(&self, kind: ComponentKind) -> HostResult<Vec<Component>>;

    /// Whether the account is active. `None` when no such account exists.
    fn user_active(&self, uid: u64) -> HostResult<Option<bool>>;

    /// Bundles indexed into the given search environment.
    fn index_bundles(&self, env_id: &str) -> HostResult<Vec<IndexBundle>>;

    /// Database engine name and version.
    fn version(&self) -> HostResult<String>;
}

/// Saved view definitions.
pub trait ViewRegistry {
    fn views(&self) -> HostResult<Vec<ViewDefinition>>;
}

/// Facts about the platform the site runs on.
pub trait Platform {
    fn framework_version(&self) -> HostResult<String>;
    fn runtime_version(&self) -> HostResult<String>;
    fn memory_limit(&self) -> HostResult<String>;
}

/// Mail dispatch.
pub trait Mailer {
    fn send(&self, message: &Message) -> HostResult<()>;
}

/// All capabilities the audit consumes.
#[derive(Clone, Copy)]
pub struct Host<'a> {
    pub config: &'a dyn ConfigStore,
    pub modules: &'a dyn ModuleRegistry,
    pub database: &'a dyn Database,
    pub views: &'a dyn ViewRegistry,
    pub platform: &'a dyn Platform,
    pub mailer: &'a dyn Mailer,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Module,
    Theme,
}

impl ComponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Module => "module",
            ComponentKind::Theme => "theme",
        }
    }
}

/// A row of the installed components table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// 1 when enabled, 0 when disabled.
    pub status: i64,
    /// -1 once the component is fully uninstalled.
    #[serde(default = "uninstalled_schema")]
    pub schema_version: i64,
}

fn uninstalled_schema() -> i64 {
    -1
}

impl Component {
    pub fn enabled(&self) -> bool {
        self.status != 0
    }

    pub fn installed(&self) -> bool {
        self.schema_version > -1
    }
}

/// A row of the search index bundle table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexBundle {
    pub env_id: String,
    pub entity_type: String,
    pub bundle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewDefinition {
    pub name: String,
    /// Display name to display configuration.
    #[serde(default)]
    pub displays: BTreeMap<String, DisplayConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DisplayConfig {
    #[serde(default)]
    pub access: Option<AccessConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessConfig {
    #[serde(rename = "type")]
    pub kind: String,
}

/// An outgoing mail message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub headers: Vec<(String, String)>,
}
