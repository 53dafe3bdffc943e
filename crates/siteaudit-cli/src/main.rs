use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use siteaudit_core::audit;
use siteaudit_core::host::sendmail::SendmailTransport;
use siteaudit_core::host::snapshot::SiteSnapshot;
use siteaudit_core::host::sqlite::SqliteDatabase;
use siteaudit_core::host::{Database, Host, ModuleRegistry};
use siteaudit_core::report::email::{Delivery, ReportRequest};
use siteaudit_core::report::render;
use siteaudit_core::util::value::domain_of;
use siteaudit_core::{AuditContext, AuditProfile, FindingSink};

mod args;

fn main() -> Result<()> {
    let args = args::Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let profile = match &args.profile {
        Some(path) => AuditProfile::load(path)
            .with_context(|| format!("failed to load profile {}", path.display()))?,
        None => AuditProfile::default(),
    };
    let snapshot = SiteSnapshot::load(&args.snapshot)?;
    let database = args
        .database
        .as_deref()
        .map(SqliteDatabase::open)
        .transpose()?;
    let mailer = SendmailTransport::new(&args.sendmail);

    let (db, modules): (&dyn Database, &dyn ModuleRegistry) = match &database {
        Some(db) => (db as &dyn Database, db as &dyn ModuleRegistry),
        None => (&snapshot as &dyn Database, &snapshot as &dyn ModuleRegistry),
    };
    let host = Host {
        config: &snapshot,
        modules,
        database: db,
        views: &snapshot,
        platform: &snapshot,
        mailer: &mailer,
    };

    let site_uri = args
        .uri
        .clone()
        .unwrap_or_else(|| snapshot.site_uri().to_string());
    let ctx = AuditContext {
        now: Utc::now(),
        site_uri,
    };
    let request = ReportRequest {
        send: args.email_report,
        address: args.email_address.clone(),
        domain: args
            .domain
            .clone()
            .or_else(|| Some(domain_of(&ctx.site_uri)).filter(|d| !d.is_empty())),
    };

    let mut sink = FindingSink::with_console(std::io::stdout());
    let summary = audit::run(&host, &profile, &ctx, &request, &mut sink)
        .context("failed to send audit report")?;

    println!("{}", render::summary_line(sink.all()));
    if let Delivery::Sent { to, errors } = &summary.delivery {
        println!("Report with {errors} errors sent to {to}");
    }

    Ok(())
}
