//! Module enablement and leftover disabled modules.

use crate::findings::FindingSink;
use crate::host::{ComponentKind, Host, HostResult};
use crate::profile::AuditProfile;
use crate::rules::eval::run_catalog;
use crate::sections::Outcome;

pub fn run(host: &Host<'_>, profile: &AuditProfile, sink: &mut FindingSink) -> HostResult<Outcome> {
    run_catalog(&profile.modules, |name| host.modules.exists(name), sink)?;
    leftovers(host, sink)?;
    Ok(Outcome::Completed)
}

/// Disabled modules whose schema is still installed.
pub fn leftovers(host: &Host<'_>, sink: &mut FindingSink) -> HostResult<()> {
    let leftover: Vec<_> = host
        .database
        .components(ComponentKind::Module)?
        .into_iter()
        .filter(|m| !m.enabled() && m.installed())
        .collect();

    if leftover.is_empty() {
        sink.info("No disabled modules are left installed");
    }
    for module in leftover {
        sink.error(format!("Module {} is disabled but not uninstalled", module.name));
    }
    Ok(())
}
