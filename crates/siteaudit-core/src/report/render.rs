//! Line formats for the operator console.

use crate::findings::model::{Finding, Severity};

pub fn header_line(title: &str) -> String {
    format!("==> {title}")
}

pub fn finding_line(finding: &Finding) -> String {
    let tag = match finding.severity() {
        Severity::Info => "ok",
        Severity::Error => "error",
    };
    format!("  [{tag}] {}", finding.message())
}

pub fn summary_line(findings: &[Finding]) -> String {
    let errors = findings.iter().filter(|f| f.is_error()).count();
    format!(
        "{} checks, {} {}",
        findings.len(),
        errors,
        if errors == 1 { "error" } else { "errors" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finding_lines_are_tagged_by_severity() {
        assert_eq!(finding_line(&Finding::info("fine")), "  [ok] fine");
        assert_eq!(finding_line(&Finding::error("broken")), "  [error] broken");
    }

    #[test]
    fn summary_counts_errors() {
        let findings = vec![
            Finding::info("a"),
            Finding::error("b"),
            Finding::info("c"),
        ];
        assert_eq!(summary_line(&findings), "3 checks, 1 error");
        assert_eq!(summary_line(&[]), "0 checks, 0 errors");
    }
}
