//! Per-memory lifetime counters. Rows double as the memory→project registry.

use rusqlite::{params, Connection, OptionalExtension};

use reasoningbank_core::errors::RbResult;
use reasoningbank_core::signals::{SignalAggregate, SignalType};

use crate::to_storage_err;

/// Create the empty aggregate row. No-op if the memory is already registered.
pub fn ensure_aggregate(conn: &Connection, memory_id: &str, project_id: &str) -> RbResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO signal_aggregates (memory_id, project_id) VALUES (?1, ?2)",
        params![memory_id, project_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_project(conn: &Connection, memory_id: &str) -> RbResult<Option<String>> {
    conn.query_row(
        "SELECT project_id FROM signal_aggregates WHERE memory_id = ?1",
        params![memory_id],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Counters for a memory; an unregistered memory reads as all zeros.
pub fn get_aggregate(conn: &Connection, memory_id: &str) -> RbResult<SignalAggregate> {
    let agg = conn
        .query_row(
            "SELECT explicit_pos, explicit_neg, usage_pos, usage_neg, outcome_pos, outcome_neg
             FROM signal_aggregates WHERE memory_id = ?1",
            params![memory_id],
            |row| {
                Ok(SignalAggregate {
                    explicit_pos: row.get::<_, i64>(0)? as u64,
                    explicit_neg: row.get::<_, i64>(1)? as u64,
                    usage_pos: row.get::<_, i64>(2)? as u64,
                    usage_neg: row.get::<_, i64>(3)? as u64,
                    outcome_pos: row.get::<_, i64>(4)? as u64,
                    outcome_neg: row.get::<_, i64>(5)? as u64,
                })
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(agg.unwrap_or_default())
}

/// Add `delta` to the stored counters.
pub fn add_to_aggregate(conn: &Connection, memory_id: &str, delta: &SignalAggregate) -> RbResult<()> {
    let (ep, en) = delta.counts(SignalType::Explicit);
    let (up, un) = delta.counts(SignalType::Usage);
    let (op, on) = delta.counts(SignalType::Outcome);
    conn.execute(
        "UPDATE signal_aggregates SET
            explicit_pos = explicit_pos + ?2,
            explicit_neg = explicit_neg + ?3,
            usage_pos    = usage_pos + ?4,
            usage_neg    = usage_neg + ?5,
            outcome_pos  = outcome_pos + ?6,
            outcome_neg  = outcome_neg + ?7,
            updated_at   = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
         WHERE memory_id = ?1",
        params![
            memory_id, ep as i64, en as i64, up as i64, un as i64, op as i64, on as i64
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
