//! Versioned schema migrations. Each runs once, in order, inside its own
//! transaction; the applied version is recorded in `schema_version`.

mod v001_signal_tables;
mod v002_project_weights;
mod v003_learning_marks;

use rusqlite::{params, Connection};
use tracing::info;

use reasoningbank_core::errors::{RbResult, StorageError};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> RbResult<()>;

const MIGRATIONS: &[(u32, &str, MigrationFn)] = &[
    (1, "signal_tables", v001_signal_tables::migrate),
    (2, "project_weights", v002_project_weights::migrate),
    (3, "learning_marks", v003_learning_marks::migrate),
];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 3;

/// Apply every migration newer than the stored version.
pub fn run_migrations(conn: &Connection) -> RbResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            name       TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    for (version, name, migrate) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current) {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(format!("migration {version} begin: {e}")))?;
        migrate(&tx).map_err(|e| StorageError::MigrationFailed {
            version: *version,
            reason: e.to_string(),
        })?;
        tx.execute(
            "INSERT INTO schema_version (version, name) VALUES (?1, ?2)",
            params![version, name],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tx.commit()
            .map_err(|e| to_storage_err(format!("migration {version} commit: {e}")))?;
        info!(version, name, "applied migration");
    }
    current_version(conn)
}

pub fn current_version(conn: &Connection) -> RbResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
