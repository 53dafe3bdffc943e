//! Comparison primitives and the catalog runner.
//!
//! Every rule reduces to [`compare`]: one finding per call, info when the
//! actual state matches the desired state, error otherwise.

use crate::error::HostError;
use crate::findings::{FindingSink, Severity};
use crate::rules::catalog::{Catalog, Desired};

/// Records an info finding when `actual == desired`, an error otherwise.
///
/// Returns whether the values matched.
pub fn compare<T: PartialEq + ?Sized>(
    actual: &T,
    desired: &T,
    info_text: impl Into<String>,
    error_text: impl Into<String>,
    sink: &mut FindingSink,
) -> bool {
    check(actual == desired, info_text, error_text, sink)
}

/// Records an info finding when `actual <= limit`, an error otherwise.
pub fn at_most<T: PartialOrd>(
    actual: T,
    limit: T,
    info_text: impl Into<String>,
    error_text: impl Into<String>,
    sink: &mut FindingSink,
) -> bool {
    check(actual <= limit, info_text, error_text, sink)
}

/// Records an info finding when `age` is strictly below `window`, an
/// error otherwise. An age equal to the window is stale.
pub fn fresher_than(
    age: i64,
    window: i64,
    info_text: impl Into<String>,
    error_text: impl Into<String>,
    sink: &mut FindingSink,
) -> bool {
    check(age < window, info_text, error_text, sink)
}

/// Records an info finding when `passed`, an error otherwise.
pub fn check(
    passed: bool,
    info_text: impl Into<String>,
    error_text: impl Into<String>,
    sink: &mut FindingSink,
) -> bool {
    if passed {
        sink.record(info_text, Severity::Info);
    } else {
        sink.record(error_text, Severity::Error);
    }
    passed
}

/// Runs every catalog entry in declaration order.
///
/// `lookup` returns whether the identified feature is currently enabled.
/// A lookup failure stops the run and propagates; entries already
/// processed keep their findings.
pub fn run_catalog<F>(catalog: &Catalog, mut lookup: F, sink: &mut FindingSink) -> Result<(), HostError>
where
    F: FnMut(&str) -> Result<bool, HostError>,
{
    for rule in catalog.rules() {
        let actual = Desired::from_enabled(lookup(&rule.identifier)?);
        compare(
            &actual,
            &rule.desired,
            format!("{} is {}", rule.label, actual.label()),
            format!(
                "{} is {}, expected {}",
                rule.label,
                actual.label(),
                rule.desired.label()
            ),
            sink,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::Finding;
    use crate::rules::catalog::RuleSpec;
    use std::collections::HashSet;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            RuleSpec::new("devel", "Devel", Desired::Disabled),
            RuleSpec::new("syslog", "Syslog", Desired::Enabled),
            RuleSpec::new("dblog", "Database logging", Desired::Disabled),
        ])
    }

    #[test]
    fn compare_matches_severity_to_equality() {
        let mut sink = FindingSink::new();
        assert!(compare(&0, &0, "same", "different", &mut sink));
        assert!(!compare("a", "b", "same", "different", &mut sink));

        assert_eq!(
            sink.all(),
            &[Finding::info("same"), Finding::error("different")]
        );
    }

    #[test]
    fn at_most_accepts_the_limit_itself() {
        let mut sink = FindingSink::new();
        assert!(at_most(3600, 3600, "ok", "too high", &mut sink));
        assert!(!at_most(3601, 3600, "ok", "too high", &mut sink));
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn fresher_than_treats_the_window_itself_as_stale() {
        let mut sink = FindingSink::new();
        assert!(fresher_than(10799, 10800, "fresh", "stale", &mut sink));
        assert!(!fresher_than(10800, 10800, "fresh", "stale", &mut sink));
        assert!(!fresher_than(10801, 10800, "fresh", "stale", &mut sink));

        assert_eq!(
            sink.all(),
            &[
                Finding::info("fresh"),
                Finding::error("stale"),
                Finding::error("stale"),
            ]
        );
    }

    #[test]
    fn one_finding_per_entry_in_declaration_order() {
        let enabled: HashSet<&str> = ["devel", "syslog"].into_iter().collect();
        let mut sink = FindingSink::new();

        run_catalog(&catalog(), |id| Ok(enabled.contains(id)), &mut sink).unwrap();

        assert_eq!(
            sink.all(),
            &[
                Finding::error("Devel is enabled, expected disabled"),
                Finding::info("Syslog is enabled"),
                Finding::info("Database logging is disabled"),
            ]
        );
    }

    #[test]
    fn rerun_against_same_state_is_identical() {
        let lookup = |id: &str| -> Result<bool, HostError> { Ok(id == "dblog") };

        let mut first = FindingSink::new();
        run_catalog(&catalog(), lookup, &mut first).unwrap();
        let mut second = FindingSink::new();
        run_catalog(&catalog(), lookup, &mut second).unwrap();

        assert_eq!(first.all(), second.all());
    }

    #[test]
    fn lookup_failure_propagates_and_keeps_earlier_findings() {
        let mut sink = FindingSink::new();
        let result = run_catalog(
            &catalog(),
            |id| {
                if id == "syslog" {
                    Err(HostError::lookup(id, "registry unavailable"))
                } else {
                    Ok(false)
                }
            },
            &mut sink,
        );

        assert!(result.is_err());
        assert_eq!(sink.len(), 1);
    }
}
