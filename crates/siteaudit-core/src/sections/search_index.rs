//! Shared search index writes from non-production domains.

use crate::findings::FindingSink;
use crate::host::{Host, HostResult, INDEX_BUNDLES_TABLE};
use crate::profile::AuditProfile;
use crate::rules::eval::check;
use crate::sections::{AuditContext, Outcome};
use crate::util::value::domain_of;

pub fn run(
    host: &Host<'_>,
    profile: &AuditProfile,
    ctx: &AuditContext,
    sink: &mut FindingSink,
) -> HostResult<Outcome> {
    let cfg = &profile.search_index;

    if !host.database.table_exists(INDEX_BUNDLES_TABLE)? {
        return Ok(Outcome::Skipped(format!("{INDEX_BUNDLES_TABLE} table not present")));
    }

    let indexed = host
        .database
        .index_bundles(&cfg.environment)?
        .iter()
        .any(|b| b.entity_type == cfg.entity_type && b.bundle == cfg.bundle);
    if !indexed {
        return Ok(Outcome::Skipped(format!(
            "{} {} content is not indexed in {}",
            cfg.entity_type, cfg.bundle, cfg.environment
        )));
    }

    let domain = domain_of(&ctx.site_uri);
    let allowed = !domain.is_empty()
        && cfg
            .allowed_domains
            .iter()
            .any(|d| domain.contains(d.to_ascii_lowercase().as_str()));

    check(
        allowed,
        format!(
            "{} content is indexed into {} from allow-listed domain {domain}",
            cfg.bundle, cfg.environment
        ),
        format!(
            "{} content is indexed into {} from {domain}, which is not an allow-listed domain",
            cfg.bundle, cfg.environment
        ),
        sink,
    );

    Ok(Outcome::Completed)
}
