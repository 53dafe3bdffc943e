//! Asset optimization flags and theme registry rebuilds.

use crate::findings::FindingSink;
use crate::host::{ComponentKind, Host, HostResult};
use crate::profile::AuditProfile;
use crate::rules::eval::run_catalog;
use crate::sections::{Outcome, flag};
use crate::util::value::truthy;

pub fn run(host: &Host<'_>, profile: &AuditProfile, sink: &mut FindingSink) -> HostResult<Outcome> {
    run_catalog(&profile.assets, |name| flag(host, name), sink)?;
    registry_rebuilds(host, profile, sink)?;
    Ok(Outcome::Completed)
}

/// Enabled themes configured to rebuild the theme registry on every request.
pub fn registry_rebuilds(
    host: &Host<'_>,
    profile: &AuditProfile,
    sink: &mut FindingSink,
) -> HostResult<()> {
    let mut offenders = 0;
    for theme in host.database.components(ComponentKind::Theme)? {
        if !theme.enabled() {
            continue;
        }
        let settings = host.config.get(&format!("theme_{}_settings", theme.name))?;
        let rebuilds = settings
            .as_ref()
            .and_then(|s| s.get(&profile.theme_rebuild_setting))
            .is_some_and(truthy);
        if rebuilds {
            offenders += 1;
            sink.error(format!(
                "Theme {} rebuilds the theme registry on every request",
                theme.name
            ));
        }
    }

    if offenders == 0 {
        sink.info("No enabled theme rebuilds the theme registry on every request");
    }
    Ok(())
}
