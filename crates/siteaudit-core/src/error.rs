//! Error types for the audit engine.

use thiserror::Error;

/// Failures raised by a host backend while reading site state or
/// dispatching mail.
#[derive(Debug, Error)]
pub enum HostError {
    /// Query against the site database failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A value exists but cannot be interpreted.
    #[error("lookup of {what} failed: {reason}")]
    Lookup { what: String, reason: String },

    /// The mail transport refused or failed to deliver the report.
    #[error("mail transport failed: {0}")]
    Transport(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HostError {
    pub fn lookup(what: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Lookup {
            what: what.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading an audit profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse profile: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid profile: {0}")]
    Invalid(String),
}
