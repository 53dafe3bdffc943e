//! Emailed summary of a finished audit.
//!
//! Only error findings are mailed, one bullet per finding in recorded
//! order. A clean audit sends nothing.

use crate::findings::Finding;
use crate::host::{HostResult, Mailer, Message};

/// What the operator asked for on the command line.
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub send: bool,
    pub address: Option<String>,
    /// Label naming the audited site in the message.
    pub domain: Option<String>,
}

/// Result of the reporting step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent { to: String, errors: usize },
    NotRequested,
    NoRecipient,
    /// The audit recorded no errors.
    NothingToReport,
}

/// Builds the report message, or `None` when no error was recorded.
pub fn compose(findings: &[Finding], to: &str, domain: &str) -> Option<Message> {
    let errors: Vec<&Finding> = findings.iter().filter(|f| f.is_error()).collect();
    if errors.is_empty() {
        return None;
    }

    let mut body = String::from("Hello,\n\n");
    body.push_str(&format!(
        "The site audit of {domain} recorded the following errors:\n\n"
    ));
    for finding in &errors {
        body.push_str(&format!("- {}\n", finding.message()));
    }

    Some(Message {
        to: to.to_string(),
        subject: format!(
            "Site audit: {} {} on {domain}",
            errors.len(),
            if errors.len() == 1 { "error" } else { "errors" }
        ),
        body,
        headers: vec![
            ("Content-Type".into(), "text/plain; charset=UTF-8".into()),
            ("X-Mailer".into(), crate::TOOL_NAME.into()),
        ],
    })
}

/// Sends the report when requested and there is something to report.
///
/// Transport failures are returned to the caller; nothing is retried.
pub fn emit(
    request: &ReportRequest,
    findings: &[Finding],
    mailer: &dyn Mailer,
) -> HostResult<Delivery> {
    if !request.send {
        return Ok(Delivery::NotRequested);
    }
    let Some(to) = request.address.as_deref().map(str::trim).filter(|a| !a.is_empty()) else {
        tracing::warn!("report requested without an address, not sending");
        return Ok(Delivery::NoRecipient);
    };

    let domain = request.domain.as_deref().unwrap_or("this site");
    let Some(message) = compose(findings, to, domain) else {
        tracing::info!("no errors recorded, not sending report");
        return Ok(Delivery::NothingToReport);
    };

    let errors = findings.iter().filter(|f| f.is_error()).count();
    mailer.send(&message)?;
    Ok(Delivery::Sent {
        to: to.to_string(),
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingMailer {
        sent: RefCell<Vec<Message>>,
    }

    impl Mailer for RecordingMailer {
        fn send(&self, message: &Message) -> HostResult<()> {
            self.sent.borrow_mut().push(message.clone());
            Ok(())
        }
    }

    struct FailingMailer;

    impl Mailer for FailingMailer {
        fn send(&self, _message: &Message) -> HostResult<()> {
            Err(HostError::Transport("connection refused".into()))
        }
    }

    fn findings() -> Vec<Finding> {
        vec![
            Finding::info("Page cache is enabled"),
            Finding::error("Block cache is disabled"),
            Finding::info("Syslog is enabled"),
            Finding::error("User #1 is active"),
        ]
    }

    fn request() -> ReportRequest {
        ReportRequest {
            send: true,
            address: Some("ops@example.com".into()),
            domain: Some("shop.example.com".into()),
        }
    }

    #[test]
    fn body_lists_only_errors_in_order() {
        let message = compose(&findings(), "ops@example.com", "shop.example.com").unwrap();

        let bullets: Vec<_> = message
            .body
            .lines()
            .filter_map(|l| l.strip_prefix("- "))
            .collect();
        assert_eq!(bullets, vec!["Block cache is disabled", "User #1 is active"]);
        assert!(message.body.starts_with("Hello,\n"));
        assert!(message.body.contains("shop.example.com"));
        assert!(!message.body.contains("Page cache is enabled"));
        assert_eq!(message.subject, "Site audit: 2 errors on shop.example.com");
    }

    #[test]
    fn sends_once_when_errors_exist() {
        let mailer = RecordingMailer::default();
        let delivery = emit(&request(), &findings(), &mailer).unwrap();

        assert_eq!(
            delivery,
            Delivery::Sent {
                to: "ops@example.com".into(),
                errors: 2
            }
        );
        assert_eq!(mailer.sent.borrow().len(), 1);
        assert_eq!(mailer.sent.borrow()[0].to, "ops@example.com");
    }

    #[test]
    fn no_email_without_errors() {
        let mailer = RecordingMailer::default();
        let clean = vec![Finding::info("Page cache is enabled")];

        let delivery = emit(&request(), &clean, &mailer).unwrap();

        assert_eq!(delivery, Delivery::NothingToReport);
        assert!(mailer.sent.borrow().is_empty());
    }

    #[test]
    fn no_email_without_address() {
        let mailer = RecordingMailer::default();
        for address in [None, Some(String::new()), Some("  ".to_string())] {
            let req = ReportRequest {
                address,
                ..request()
            };
            assert_eq!(emit(&req, &findings(), &mailer).unwrap(), Delivery::NoRecipient);
        }
        assert!(mailer.sent.borrow().is_empty());
    }

    #[test]
    fn no_email_unless_requested() {
        let mailer = RecordingMailer::default();
        let req = ReportRequest {
            send: false,
            ..request()
        };
        assert_eq!(emit(&req, &findings(), &mailer).unwrap(), Delivery::NotRequested);
        assert!(mailer.sent.borrow().is_empty());
    }

    #[test]
    fn transport_failure_propagates() {
        let err = emit(&request(), &findings(), &FailingMailer).unwrap_err();
        assert!(matches!(err, HostError::Transport(_)));
    }
}
