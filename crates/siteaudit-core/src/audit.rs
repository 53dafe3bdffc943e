//! Audit orchestrator.
//!
//! Runs every section in [`Section::ORDER`], then the reporting step.
//! A host failure inside a section is contained at the section boundary:
//! it is recorded as an error finding naming the section and the run
//! moves on to the next section. Only mail transport failures escape.

use crate::findings::FindingSink;
use crate::host::{Host, HostResult};
use crate::profile::AuditProfile;
use crate::report::email::{self, Delivery, ReportRequest};
use crate::sections::{AuditContext, Outcome, Section};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReport {
    pub section: Section,
    pub status: SectionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionStatus {
    Completed,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditSummary {
    pub sections: Vec<SectionReport>,
    pub delivery: Delivery,
}

/// Runs all audit sections against `host`, appending to `sink`.
pub fn run_sections(
    host: &Host<'_>,
    profile: &AuditProfile,
    ctx: &AuditContext,
    sink: &mut FindingSink,
) -> Vec<SectionReport> {
    Section::ORDER
        .iter()
        .map(|&section| {
            sink.section(section.title());
            tracing::info!(%section, "running audit section");

            let status = match section.run(host, profile, ctx, sink) {
                Ok(Outcome::Completed) => SectionStatus::Completed,
                Ok(Outcome::Skipped(reason)) => {
                    tracing::info!(%section, %reason, "section skipped");
                    SectionStatus::Skipped(reason)
                }
                Err(e) => {
                    tracing::warn!(%section, error = %e, "section failed");
                    sink.error(format!("{section} checks failed: {e}"));
                    SectionStatus::Failed(e.to_string())
                }
            };
            SectionReport { section, status }
        })
        .collect()
}

/// Full run: every section, then the optional emailed report.
pub fn run(
    host: &Host<'_>,
    profile: &AuditProfile,
    ctx: &AuditContext,
    request: &ReportRequest,
    sink: &mut FindingSink,
) -> HostResult<AuditSummary> {
    let sections = run_sections(host, profile, ctx, sink);
    let delivery = email::emit(request, sink.all(), host.mailer)?;
    tracing::info!(
        findings = sink.len(),
        errors = sink.error_count(),
        ?delivery,
        "audit finished"
    );
    Ok(AuditSummary { sections, delivery })
}
