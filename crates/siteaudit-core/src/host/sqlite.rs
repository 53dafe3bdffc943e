//! Table lookups against a site's SQLite database.

use std::path::Path;

use anyhow::Context;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};

use crate::host::{Component, ComponentKind, Database, HostResult, IndexBundle, ModuleRegistry};

/// Read-only connection to the site database.
///
/// Expects the host's own schema: `system (name, type, status,
/// schema_version)`, `users (uid, status)` and, when the search
/// integration is installed, `apachesolr_index_bundles (env_id,
/// entity_type, bundle)`.
pub struct SqliteDatabase {
    conn: Connection,
}

impl SqliteDatabase {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("failed to open site database {}", path.display()))?;
        tracing::info!(path = %path.display(), "opened site database");
        Ok(Self { conn })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl Database for SqliteDatabase {
    fn table_exists(&self, table: &str) -> HostResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![table],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn components(&self, kind: ComponentKind) -> HostResult<Vec<Component>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, status, schema_version FROM system WHERE type = ?1 ORDER BY name",
        )?;
        let rows = stmt
            .query_map(params![kind.as_str()], |row| {
                Ok(Component {
                    name: row.get(0)?,
                    kind,
                    status: row.get(1)?,
                    schema_version: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn user_active(&self, uid: u64) -> HostResult<Option<bool>> {
        let status: Option<i64> = self
            .conn
            .query_row(
                "SELECT status FROM users WHERE uid = ?1",
                params![uid as i64],
                |row| row.get(0),
            )
            .optional()?;
        Ok(status.map(|s| s != 0))
    }

    fn index_bundles(&self, env_id: &str) -> HostResult<Vec<IndexBundle>> {
        let mut stmt = self.conn.prepare(
            "SELECT env_id, entity_type, bundle FROM apachesolr_index_bundles \
             WHERE env_id = ?1 ORDER BY entity_type, bundle",
        )?;
        let rows = stmt
            .query_map(params![env_id], |row| {
                Ok(IndexBundle {
                    env_id: row.get(0)?,
                    entity_type: row.get(1)?,
                    bundle: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn version(&self) -> HostResult<String> {
        let version: String = self
            .conn
            .query_row("SELECT sqlite_version()", [], |row| row.get(0))?;
        Ok(format!("SQLite {version}"))
    }
}

impl ModuleRegistry for SqliteDatabase {
    fn exists(&self, name: &str) -> HostResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM system WHERE type = 'module' AND name = ?1 AND status <> 0",
                params![name],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}
