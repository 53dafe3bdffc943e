//! Page, block and external cache settings.

use crate::findings::FindingSink;
use crate::host::{Host, HostResult};
use crate::profile::AuditProfile;
use crate::rules::eval::{at_most, check, compare};
use crate::sections::{Outcome, flag, integer};

pub fn run(host: &Host<'_>, profile: &AuditProfile, sink: &mut FindingSink) -> HostResult<Outcome> {
    check(
        flag(host, "cache")?,
        "Page cache is enabled",
        "Page cache is disabled",
        sink,
    );
    check(
        flag(host, "block_cache")?,
        "Block cache is enabled",
        "Block cache is disabled",
        sink,
    );

    let lifetime = integer(host, "cache_lifetime", 0)?;
    compare(
        &lifetime,
        &profile.cache_lifetime,
        format!("Minimum cache lifetime is {lifetime} seconds"),
        format!(
            "Minimum cache lifetime is {lifetime} seconds, expected {}",
            profile.cache_lifetime
        ),
        sink,
    );

    let max_age = integer(host, "page_cache_maximum_age", 0)?;
    at_most(
        max_age,
        profile.external_cache_max_age,
        format!("External cache maximum age is {max_age} seconds"),
        format!(
            "External cache maximum age is {max_age} seconds, above {}",
            profile.external_cache_max_age
        ),
        sink,
    );

    Ok(Outcome::Completed)
}
