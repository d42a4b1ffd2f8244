//! Signal log: append and windowed reads.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use reasoningbank_core::errors::{RbResult, StorageError};
use reasoningbank_core::signals::{Signal, SignalType};

use super::{from_micros, to_micros};
use crate::to_storage_err;

pub fn insert_signal(conn: &Connection, signal: &Signal) -> RbResult<i64> {
    conn.execute(
        "INSERT INTO signals (memory_id, project_id, signal_type, positive, session_id, timestamp_us)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            signal.memory_id,
            signal.project_id,
            signal.signal_type.as_str(),
            signal.positive,
            signal.session_id,
            to_micros(signal.timestamp),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Unfolded signals with `since <= timestamp <= until`, oldest first.
pub fn signals_between(
    conn: &Connection,
    memory_id: &str,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
) -> RbResult<Vec<Signal>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT memory_id, project_id, signal_type, positive, session_id, timestamp_us
             FROM signals
             WHERE memory_id = ?1 AND folded = 0 AND timestamp_us >= ?2 AND timestamp_us <= ?3
             ORDER BY timestamp_us ASC, id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(
            params![memory_id, to_micros(since), to_micros(until)],
            RawSignal::from_row,
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(raw.into_signal()?);
    }
    Ok(out)
}

/// Unfolded signals strictly older than `cutoff`, with their row ids.
pub fn unfolded_before(
    conn: &Connection,
    memory_id: &str,
    cutoff: DateTime<Utc>,
) -> RbResult<Vec<(i64, Signal)>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, memory_id, project_id, signal_type, positive, session_id, timestamp_us
             FROM signals
             WHERE memory_id = ?1 AND folded = 0 AND timestamp_us < ?2
             ORDER BY id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![memory_id, to_micros(cutoff)], |row| {
            let id: i64 = row.get(0)?;
            Ok((id, RawSignal::from_row_at(row, 1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (id, raw) = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push((id, raw.into_signal()?));
    }
    Ok(out)
}

pub fn mark_folded(conn: &Connection, ids: &[i64]) -> RbResult<()> {
    let mut stmt = conn
        .prepare_cached("UPDATE signals SET folded = 1 WHERE id = ?1 AND folded = 0")
        .map_err(|e| to_storage_err(e.to_string()))?;
    for id in ids {
        stmt.execute(params![id])
            .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}

/// Signals not yet taught to the learner with `since <= timestamp <= until`,
/// oldest first, with their row ids.
pub fn unlearned_between(
    conn: &Connection,
    memory_id: &str,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
) -> RbResult<Vec<(i64, Signal)>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, memory_id, project_id, signal_type, positive, session_id, timestamp_us
             FROM signals
             WHERE memory_id = ?1 AND learned = 0 AND timestamp_us >= ?2 AND timestamp_us <= ?3
             ORDER BY timestamp_us ASC, id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(
            params![memory_id, to_micros(since), to_micros(until)],
            |row| {
                let id: i64 = row.get(0)?;
                Ok((id, RawSignal::from_row_at(row, 1)?))
            },
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (id, raw) = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push((id, raw.into_signal()?));
    }
    Ok(out)
}

pub fn mark_learned(conn: &Connection, ids: &[i64]) -> RbResult<()> {
    let mut stmt = conn
        .prepare_cached("UPDATE signals SET learned = 1 WHERE id = ?1 AND learned = 0")
        .map_err(|e| to_storage_err(e.to_string()))?;
    for id in ids {
        stmt.execute(params![id])
            .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}

pub fn count_signals(conn: &Connection, memory_id: &str) -> RbResult<usize> {
    let n: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM signals WHERE memory_id = ?1",
            params![memory_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n as usize)
}

/// Row as read from SQLite, before type parsing.
struct RawSignal {
    memory_id: String,
    project_id: String,
    signal_type: String,
    positive: bool,
    session_id: Option<String>,
    timestamp_us: i64,
}

impl RawSignal {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Self::from_row_at(row, 0)
    }

    fn from_row_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            memory_id: row.get(offset)?,
            project_id: row.get(offset + 1)?,
            signal_type: row.get(offset + 2)?,
            positive: row.get(offset + 3)?,
            session_id: row.get(offset + 4)?,
            timestamp_us: row.get(offset + 5)?,
        })
    }

    fn into_signal(self) -> RbResult<Signal> {
        let signal_type: SignalType =
            self.signal_type
                .parse()
                .map_err(|_| StorageError::CorruptRow {
                    table: "signals",
                    details: format!("unknown signal_type '{}'", self.signal_type),
                })?;
        let timestamp = from_micros(self.timestamp_us).ok_or_else(|| StorageError::CorruptRow {
            table: "signals",
            details: format!("timestamp out of range: {}", self.timestamp_us),
        })?;
        Ok(Signal {
            memory_id: self.memory_id,
            project_id: self.project_id,
            signal_type,
            positive: self.positive,
            session_id: self.session_id,
            timestamp,
        })
    }
}
