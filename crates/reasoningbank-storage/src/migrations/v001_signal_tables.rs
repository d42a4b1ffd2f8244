//! v001: signal log and per-memory aggregate counters.

use rusqlite::Connection;

use reasoningbank_core::errors::RbResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> RbResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS signals (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            memory_id    TEXT NOT NULL,
            project_id   TEXT NOT NULL,
            signal_type  TEXT NOT NULL CHECK (signal_type IN ('explicit', 'usage', 'outcome')),
            positive     INTEGER NOT NULL,
            session_id   TEXT,
            timestamp_us INTEGER NOT NULL,
            folded       INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_signals_memory_time ON signals(memory_id, timestamp_us);
        CREATE INDEX IF NOT EXISTS idx_signals_unfolded ON signals(memory_id, folded);

        CREATE TABLE IF NOT EXISTS signal_aggregates (
            memory_id    TEXT PRIMARY KEY,
            project_id   TEXT NOT NULL,
            explicit_pos INTEGER NOT NULL DEFAULT 0,
            explicit_neg INTEGER NOT NULL DEFAULT 0,
            usage_pos    INTEGER NOT NULL DEFAULT 0,
            usage_neg    INTEGER NOT NULL DEFAULT 0,
            outcome_pos  INTEGER NOT NULL DEFAULT 0,
            outcome_neg  INTEGER NOT NULL DEFAULT 0,
            created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_aggregates_project ON signal_aggregates(project_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
