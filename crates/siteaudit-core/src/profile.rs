//! Audit profile: catalogs and thresholds the sections compare against.
//!
//! The built-in profile is what the tool checks by default. A TOML file
//! can override any subset of it; missing keys keep their default and
//! unknown keys are rejected.
//!
//! ```toml
//! cron_freshness_secs = 7200
//!
//! [search_index]
//! allowed_domains = ["fclmedia.com", "fclmedia.net"]
//!
//! [[modules]]
//! identifier = "devel"
//! label = "Devel"
//! desired = "disabled"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::rules::catalog::{self, Catalog};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AuditProfile {
    /// Module enablement catalog.
    pub modules: Catalog,
    /// Asset optimization flags catalog.
    pub assets: Catalog,
    /// Cron must have run strictly less than this many seconds ago.
    pub cron_freshness_secs: i64,
    /// Highest acceptable external cache max-age, in seconds.
    pub external_cache_max_age: i64,
    /// Required minimum cache lifetime (0 means none).
    pub cache_lifetime: i64,
    /// Account that must stay blocked.
    pub privileged_uid: u64,
    /// Theme setting that rebuilds the theme registry on every request.
    pub theme_rebuild_setting: String,
    pub search_index: SearchIndexProfile,
}

impl Default for AuditProfile {
    fn default() -> Self {
        Self {
            modules: catalog::default_modules(),
            assets: catalog::default_assets(),
            cron_freshness_secs: 3 * 60 * 60,
            external_cache_max_age: 3600,
            cache_lifetime: 0,
            privileged_uid: 1,
            theme_rebuild_setting: "zen_rebuild_registry".to_string(),
            search_index: SearchIndexProfile::default(),
        }
    }
}

/// Which content must only be indexed from allow-listed domains.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SearchIndexProfile {
    pub environment: String,
    pub entity_type: String,
    pub bundle: String,
    /// Substrings of the site domain that may write to the shared index.
    pub allowed_domains: Vec<String>,
}

impl Default for SearchIndexProfile {
    fn default() -> Self {
        Self {
            environment: "solr".to_string(),
            entity_type: "node".to_string(),
            bundle: "product".to_string(),
            allowed_domains: vec!["fclmedia.com".to_string()],
        }
    }
}

impl AuditProfile {
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let raw = std::fs::read_to_string(path)?;
        let profile = Self::from_toml(&raw)?;
        tracing::info!(
            path = %path.display(),
            modules = profile.modules.len(),
            assets = profile.assets.len(),
            "loaded audit profile"
        );
        Ok(profile)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ProfileError> {
        let profile: Self = toml::from_str(raw)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        self.modules
            .validate()
            .map_err(|e| ProfileError::Invalid(format!("modules: {e}")))?;
        self.assets
            .validate()
            .map_err(|e| ProfileError::Invalid(format!("assets: {e}")))?;
        if self.cron_freshness_secs <= 0 {
            return Err(ProfileError::Invalid(
                "cron_freshness_secs must be positive".into(),
            ));
        }
        if self.search_index.allowed_domains.iter().any(|d| d.trim().is_empty()) {
            return Err(ProfileError::Invalid(
                "search_index.allowed_domains must not contain empty entries".into(),
            ));
        }
        Ok(())
    }
}
