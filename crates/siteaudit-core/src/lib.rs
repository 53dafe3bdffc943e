//! Rule-based audit of a content-management deployment.
//!
//! Sections of rules read site state through the capability traits in
//! [`host`], record [`findings::Finding`]s into a [`findings::FindingSink`],
//! and [`report::email`] optionally mails the errors once the run is over.

pub mod audit;
pub mod error;
pub mod findings;
pub mod host;
pub mod profile;
pub mod report;
pub mod rules;
pub mod sections;
pub mod util;

pub use audit::{AuditSummary, SectionReport, SectionStatus};
pub use error::{HostError, ProfileError};
pub use findings::{Finding, FindingSink, Severity};
pub use host::Host;
pub use profile::AuditProfile;
pub use sections::{AuditContext, Outcome, Section};

pub const TOOL_NAME: &str = "siteaudit";
