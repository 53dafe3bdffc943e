//! Audit sections.
//!
//! A section is a named group of rules run as a unit. Sections run in the
//! fixed order of [`Section::ORDER`] and never depend on each other's
//! results.

pub mod assets;
pub mod caching;
pub mod environment;
pub mod modules;
pub mod search_index;
pub mod security;

use chrono::{DateTime, Utc};

use crate::error::HostError;
use crate::findings::FindingSink;
use crate::host::{Host, HostResult};
use crate::profile::AuditProfile;
use crate::util::value::{as_i64, truthy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Environment,
    Modules,
    Caching,
    Assets,
    Security,
    SearchIndex,
}

impl Section {
    pub const ORDER: [Section; 6] = [
        Section::Environment,
        Section::Modules,
        Section::Caching,
        Section::Assets,
        Section::Security,
        Section::SearchIndex,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Environment => "Environment",
            Section::Modules => "Modules",
            Section::Caching => "Caching",
            Section::Assets => "Assets",
            Section::Security => "Security",
            Section::SearchIndex => "Search index",
        }
    }

    pub fn run(
        self,
        host: &Host<'_>,
        profile: &AuditProfile,
        ctx: &AuditContext,
        sink: &mut FindingSink,
    ) -> HostResult<Outcome> {
        match self {
            Section::Environment => environment::run(host, profile, ctx, sink),
            Section::Modules => modules::run(host, profile, sink),
            Section::Caching => caching::run(host, profile, sink),
            Section::Assets => assets::run(host, profile, sink),
            Section::Security => security::run(host, profile, sink),
            Section::SearchIndex => search_index::run(host, profile, ctx, sink),
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// How a section (or a gated rule) ended.
///
/// `Skipped` is distinct from a clean completion: it means a precondition
/// was absent and the dependent checks did not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Skipped(String),
}

/// Per-run facts that do not come from the host.
#[derive(Debug, Clone)]
pub struct AuditContext {
    pub now: DateTime<Utc>,
    /// URI the audited site is served from.
    pub site_uri: String,
}

/// Whether a configuration variable is set to a truthy value.
pub(crate) fn flag(host: &Host<'_>, name: &str) -> HostResult<bool> {
    Ok(host.config.get(name)?.as_ref().is_some_and(truthy))
}

/// Integer configuration variable, `default` when unset.
pub(crate) fn integer(host: &Host<'_>, name: &str, default: i64) -> HostResult<i64> {
    match host.config.get(name)? {
        None | Some(serde_json::Value::Null) => Ok(default),
        Some(value) => {
            as_i64(&value).ok_or_else(|| HostError::lookup(name, format!("not an integer: {value}")))
        }
    }
}
