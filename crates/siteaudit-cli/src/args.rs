use std::path::PathBuf;

use clap::Parser;

use siteaudit_core::host::sendmail::DEFAULT_SENDMAIL;

#[derive(Debug, Parser)]
#[command(
    name = "siteaudit",
    version,
    about = "Audit a content-management site's configuration and report findings"
)]
pub struct Args {
    /// JSON export of the site state
    #[arg(long, env = "SITEAUDIT_SNAPSHOT")]
    pub snapshot: PathBuf,

    /// SQLite site database to read tables from instead of the snapshot
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// TOML audit profile overriding the built-in catalogs and thresholds
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Email the errors found to --email-address
    #[arg(short = 'e', long, requires = "email_address")]
    pub email_report: bool,

    /// Recipient of the emailed report
    #[arg(short = 'a', long)]
    pub email_address: Option<String>,

    /// Site name used in the emailed report
    #[arg(short = 'd', long)]
    pub domain: Option<String>,

    /// URI the site is served from; defaults to the snapshot's site_uri
    #[arg(long)]
    pub uri: Option<String>,

    /// sendmail-compatible binary used to deliver the report
    #[arg(long, env = "SITEAUDIT_SENDMAIL", default_value = DEFAULT_SENDMAIL)]
    pub sendmail: PathBuf,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
