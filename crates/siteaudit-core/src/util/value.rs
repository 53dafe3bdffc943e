//! Helpers for interpreting loosely typed host values.
//!
//! Configuration variables arrive as JSON values exported from the host.
//! The host itself is lenient about their types (`"1"`, `1` and `true`
//! all switch a feature on), so every check reads them through these
//! helpers instead of matching on `serde_json::Value` directly.

use serde_json::Value;

/// Truthiness of a host value.
///
/// - `null`, `false`, `0`, `""` and `"0"` are false
/// - empty arrays and objects are false
/// - everything else is true
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Integer reading of a host value. Numeric strings are accepted.
pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Host name of a site URI.
///
/// Accepts a bare domain as well as a full URI; the scheme, port, path
/// and any credentials are dropped and the result is lowercased.
pub fn domain_of(uri: &str) -> String {
    let rest = uri.split_once("://").map_or(uri, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = host.split(':').next().unwrap_or_default();
    host.trim().to_ascii_lowercase()
}
