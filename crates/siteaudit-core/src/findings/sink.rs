//! Ordered accumulator for audit findings.
//!
//! The sink is passed explicitly through every section and rule. It is
//! the only place findings are stored during a run, and insertion order
//! is the order operators see on the console and in the emailed report.

use std::io::Write;

use crate::findings::model::{Finding, Severity};
use crate::report::render;

/// Collects findings in recorded order and echoes them to an optional
/// operator console as they arrive.
#[derive(Default)]
pub struct FindingSink {
    findings: Vec<Finding>,
    console: Option<Box<dyn Write>>,
}

impl FindingSink {
    /// A sink that only collects.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that also writes every section header and finding to `console`.
    pub fn with_console(console: impl Write + 'static) -> Self {
        Self {
            findings: Vec::new(),
            console: Some(Box::new(console)),
        }
    }

    /// Echoes a section header. Records nothing.
    pub fn section(&mut self, title: &str) {
        self.echo(&render::header_line(title));
    }

    /// Appends a finding.
    pub fn record(&mut self, message: impl Into<String>, severity: Severity) {
        let finding = Finding::new(message, severity);
        tracing::debug!(severity = %finding.severity(), text = finding.message(), "finding recorded");
        self.echo(&render::finding_line(&finding));
        self.findings.push(finding);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.record(message, Severity::Info);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.record(message, Severity::Error);
    }

    /// All findings in recorded order.
    pub fn all(&self) -> &[Finding] {
        &self.findings
    }

    /// Error findings in recorded order.
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    fn echo(&mut self, line: &str) {
        if let Some(console) = self.console.as_mut() {
            // A closed console must not abort the audit.
            if let Err(e) = writeln!(console, "{line}").and_then(|()| console.flush()) {
                tracing::warn!(error = %e, "failed to write to console");
            }
        }
    }
}

impl std::fmt::Debug for FindingSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FindingSink")
            .field("findings", &self.findings)
            .field("console", &self.console.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Console double that keeps everything written to it.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn record_preserves_insertion_order() {
        let mut sink = FindingSink::new();
        sink.info("first");
        sink.error("second");
        sink.info("third");

        let messages: Vec<_> = sink.all().iter().map(Finding::message).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn all_is_idempotent() {
        let mut sink = FindingSink::new();
        sink.error("broken");

        assert_eq!(sink.all(), sink.all());
        assert_eq!(sink.all().len(), 1);
    }

    #[test]
    fn errors_filters_informational_findings() {
        let mut sink = FindingSink::new();
        sink.info("fine");
        sink.error("bad one");
        sink.info("also fine");
        sink.error("bad two");

        let errors: Vec<_> = sink.errors().map(Finding::message).collect();
        assert_eq!(errors, vec!["bad one", "bad two"]);
        assert_eq!(sink.error_count(), 2);
    }

    #[test]
    fn console_receives_headers_and_findings() {
        let buffer = SharedBuffer::default();
        let mut sink = FindingSink::with_console(buffer.clone());

        sink.section("Caching");
        sink.info("Page cache is enabled");
        sink.error("Block cache is disabled");

        assert_eq!(
            buffer.contents(),
            "==> Caching\n  [ok] Page cache is enabled\n  [error] Block cache is disabled\n"
        );
        // Headers are not findings.
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn handles_thousands_of_findings() {
        let mut sink = FindingSink::new();
        for i in 0..5000 {
            sink.info(format!("finding {i}"));
        }
        assert_eq!(sink.len(), 5000);
        assert_eq!(sink.all()[4999].message(), "finding 4999");
    }
}
