//! v002: learned per-project channel reliability.

use rusqlite::Connection;

use reasoningbank_core::errors::RbResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> RbResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS project_weights (
            project_id     TEXT PRIMARY KEY,
            explicit_alpha REAL NOT NULL DEFAULT 1.0 CHECK (explicit_alpha >= 1.0),
            explicit_beta  REAL NOT NULL DEFAULT 1.0 CHECK (explicit_beta >= 1.0),
            usage_alpha    REAL NOT NULL DEFAULT 1.0 CHECK (usage_alpha >= 1.0),
            usage_beta     REAL NOT NULL DEFAULT 1.0 CHECK (usage_beta >= 1.0),
            outcome_alpha  REAL NOT NULL DEFAULT 1.0 CHECK (outcome_alpha >= 1.0),
            outcome_beta   REAL NOT NULL DEFAULT 1.0 CHECK (outcome_beta >= 1.0),
            updated_at     TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
