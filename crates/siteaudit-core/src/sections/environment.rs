//! Platform facts, temporary directory and cron recency.

use std::path::Path;

use crate::findings::FindingSink;
use crate::host::{Host, HostResult};
use crate::profile::AuditProfile;
use crate::rules::eval::{check, fresher_than};
use crate::sections::{AuditContext, Outcome};

pub fn run(
    host: &Host<'_>,
    profile: &AuditProfile,
    ctx: &AuditContext,
    sink: &mut FindingSink,
) -> HostResult<Outcome> {
    sink.info(format!("Framework version: {}", host.platform.framework_version()?));
    sink.info(format!("Runtime version: {}", host.platform.runtime_version()?));
    sink.info(format!("Memory limit: {}", host.platform.memory_limit()?));
    sink.info(format!("Database version: {}", host.database.version()?));

    temp_directory(host, sink)?;
    cron(host, profile, ctx, sink)?;

    Ok(Outcome::Completed)
}

pub fn temp_directory(host: &Host<'_>, sink: &mut FindingSink) -> HostResult<()> {
    let path = host
        .config
        .get("file_temporary_path")?
        .and_then(|v| v.as_str().map(str::to_owned))
        .filter(|p| !p.is_empty());

    match path {
        Some(path) => {
            check(
                is_writable_dir(Path::new(&path)),
                format!("Temporary directory {path} is accessible"),
                format!("Temporary directory {path} is not accessible"),
                sink,
            );
        }
        None => sink.error("Temporary directory is not accessible: file_temporary_path is not set"),
    }
    Ok(())
}

/// Writable for the running process, checked by creating a scratch file.
fn is_writable_dir(path: &Path) -> bool {
    path.is_dir() && tempfile::tempfile_in(path).is_ok()
}

/// Cron is fresh only when it ran strictly less than the window ago.
pub fn cron(
    host: &Host<'_>,
    profile: &AuditProfile,
    ctx: &AuditContext,
    sink: &mut FindingSink,
) -> HostResult<()> {
    let last = super::integer(host, "cron_last", 0)?;
    if last <= 0 {
        sink.error("Cron has never run");
        return Ok(());
    }

    let age = ctx.now.timestamp() - last;
    fresher_than(
        age,
        profile.cron_freshness_secs,
        format!("Cron last ran {} ago", describe(age)),
        format!(
            "Cron has not run in the last {} (last run {} ago)",
            describe(profile.cron_freshness_secs),
            describe(age)
        ),
        sink,
    );
    Ok(())
}

fn describe(secs: i64) -> String {
    let secs = secs.max(0);
    if secs >= 3600 && secs % 3600 == 0 {
        plural(secs / 3600, "hour")
    } else if secs >= 60 {
        plural(secs / 60, "minute")
    } else {
        plural(secs, "second")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
