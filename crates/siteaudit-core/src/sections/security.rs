//! Privileged account, error display, update access and view access.

use crate::findings::FindingSink;
use crate::host::{Host, HostResult, ViewDefinition};
use crate::profile::AuditProfile;
use crate::rules::eval::{check, compare};
use crate::sections::{Outcome, flag, integer};

/// Error display level that hides messages from visitors.
const ERROR_REPORTING_HIDE: i64 = 0;

/// Host default when `error_level` is unset: display all errors.
const ERROR_REPORTING_DEFAULT: i64 = 2;

pub fn run(host: &Host<'_>, profile: &AuditProfile, sink: &mut FindingSink) -> HostResult<Outcome> {
    let uid = profile.privileged_uid;
    // A missing account cannot log in.
    let active = host.database.user_active(uid)?.unwrap_or(false);
    check(
        !active,
        format!("User #{uid} is blocked"),
        format!("User #{uid} is active"),
        sink,
    );

    let level = integer(host, "error_level", ERROR_REPORTING_DEFAULT)?;
    compare(
        &level,
        &ERROR_REPORTING_HIDE,
        "Error messages are hidden from visitors",
        format!("Error messages are displayed to visitors (error_level {level})"),
        sink,
    );

    check(
        !flag(host, "update_free_access")?,
        "update.php requires authentication",
        "update.php is accessible without authentication",
        sink,
    );

    if host.modules.exists("views")? {
        view_access(&host.views.views()?, sink);
    } else {
        tracing::info!("views module not enabled, skipping view access check");
    }

    Ok(Outcome::Completed)
}

/// Flags every view display whose access plugin is `none`.
///
/// Records one finding: an error listing every offending
/// `view (display)` pair, or an info when there are none.
pub fn view_access(views: &[ViewDefinition], sink: &mut FindingSink) {
    let open: Vec<String> = views
        .iter()
        .flat_map(|view| {
            view.displays
                .iter()
                .filter(|(_, display)| display.access.as_ref().is_some_and(|a| a.kind == "none"))
                .map(move |(display, _)| format!("{} ({display})", view.name))
        })
        .collect();

    check(
        open.is_empty(),
        "All views displays have access control",
        format!("Views displays without access control: {}", open.join(", ")),
        sink,
    );
}
