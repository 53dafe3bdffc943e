//! Rule catalogs.
//!
//! A catalog is an ordered list of rule specifications processed uniformly
//! by [`crate::rules::eval::run_catalog`]. Declaration order is the output
//! order, so catalogs are plain vectors and never sorted.

use serde::{Deserialize, Serialize};

/// Desired state of a catalog entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Desired {
    Enabled,
    Disabled,
}

impl Desired {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Desired::Enabled
        } else {
            Desired::Disabled
        }
    }

    pub fn is_enabled(self) -> bool {
        self == Desired::Enabled
    }

    pub fn label(self) -> &'static str {
        match self {
            Desired::Enabled => "enabled",
            Desired::Disabled => "disabled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    /// Machine name looked up in the host (module name, variable name).
    pub identifier: String,
    /// Human label used in findings.
    pub label: String,
    pub desired: Desired,
}

impl RuleSpec {
    pub fn new(identifier: &str, label: &str, desired: Desired) -> Self {
        Self {
            identifier: identifier.to_string(),
            label: label.to_string(),
            desired,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Catalog {
    rules: Vec<RuleSpec>,
}

impl Catalog {
    pub fn new(rules: Vec<RuleSpec>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Checks that every identifier is present and unique.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for rule in &self.rules {
            if rule.identifier.trim().is_empty() {
                return Err(format!("rule '{}' has an empty identifier", rule.label));
            }
            if !seen.insert(rule.identifier.as_str()) {
                return Err(format!("duplicate rule identifier '{}'", rule.identifier));
            }
        }
        Ok(())
    }
}

/// Modules whose enablement is audited, in report order.
pub fn default_modules() -> Catalog {
    use Desired::{Disabled, Enabled};

    Catalog::new(vec![
        RuleSpec::new("devel", "Devel", Disabled),
        RuleSpec::new("devel_generate", "Devel generate", Disabled),
        RuleSpec::new("views_ui", "Views UI", Disabled),
        RuleSpec::new("field_ui", "Field UI", Disabled),
        RuleSpec::new("dblog", "Database logging", Disabled),
        RuleSpec::new("php", "PHP filter", Disabled),
        RuleSpec::new("statistics", "Statistics", Disabled),
        RuleSpec::new("update", "Update manager", Disabled),
        RuleSpec::new("syslog", "Syslog", Enabled),
        RuleSpec::new("memcache", "Memcache", Enabled),
        RuleSpec::new("entitycache", "Entity cache", Enabled),
    ])
}

/// Asset optimization flags, in report order.
pub fn default_assets() -> Catalog {
    Catalog::new(vec![
        RuleSpec::new("preprocess_css", "CSS aggregation", Desired::Enabled),
        RuleSpec::new("preprocess_js", "JavaScript aggregation", Desired::Enabled),
        RuleSpec::new("page_compression", "Page compression", Desired::Enabled),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalogs_are_valid() {
        assert_eq!(default_modules().len(), 11);
        assert_eq!(default_assets().len(), 3);
        assert!(default_modules().validate().is_ok());
        assert!(default_assets().validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicates() {
        let catalog = Catalog::new(vec![
            RuleSpec::new("devel", "Devel", Desired::Disabled),
            RuleSpec::new("devel", "Devel again", Desired::Enabled),
        ]);
        let err = catalog.validate().unwrap_err();
        assert!(err.contains("duplicate"));
    }

    #[test]
    fn validate_rejects_empty_identifier() {
        let catalog = Catalog::new(vec![RuleSpec::new(" ", "Blank", Desired::Enabled)]);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn desired_serializes_lowercase() {
        let s = serde_json::to_string(&Desired::Disabled).unwrap();
        assert_eq!(s, "\"disabled\"");
    }
}
