//! v003: marks signals that have already taught the weight learner.

use rusqlite::Connection;

use reasoningbank_core::errors::RbResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> RbResult<()> {
    conn.execute_batch(
        "
        ALTER TABLE signals ADD COLUMN learned INTEGER NOT NULL DEFAULT 0;
        CREATE INDEX IF NOT EXISTS idx_signals_unlearned
            ON signals(memory_id, learned, timestamp_us);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
