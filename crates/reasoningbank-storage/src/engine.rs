//! SignalStore: owns the connection pool and implements [`ISignalStore`].

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::{debug, instrument};

use reasoningbank_core::config::StorageConfig;
use reasoningbank_core::errors::{RbResult, ReasoningBankError};
use reasoningbank_core::signals::{ProjectWeights, Signal, SignalAggregate, SignalType};
use reasoningbank_core::traits::ISignalStore;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{aggregate_ops, signal_ops, weights_ops};
use crate::to_storage_err;

pub struct SignalStore {
    pool: ConnectionPool,
}

impl SignalStore {
    /// Open a file-backed store with default pool settings.
    pub fn open(path: &Path) -> RbResult<Self> {
        Self::open_with(path, &StorageConfig::default())
    }

    /// Open the store described by `config`. A `db_path` of `:memory:` opens
    /// an in-memory store.
    pub fn from_config(config: &StorageConfig) -> RbResult<Self> {
        if config.db_path == ":memory:" {
            return Self::open_in_memory();
        }
        Self::open_with(Path::new(&config.db_path), config)
    }

    fn open_with(path: &Path, config: &StorageConfig) -> RbResult<Self> {
        let mut pool = ConnectionPool::open(path, config.busy_timeout_ms)?;
        pool.writer.with_conn_sync(|conn| migrations::run_migrations(conn).map(|_| ()))?;
        pool.attach_readers(config.read_pool_size, config.busy_timeout_ms)?;
        debug!(path = %path.display(), readers = config.read_pool_size, "signal store opened");
        Ok(Self { pool })
    }

    /// In-memory store. All reads go through the writer.
    pub fn open_in_memory() -> RbResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        pool.writer.with_conn_sync(|conn| migrations::run_migrations(conn).map(|_| ()))?;
        Ok(Self { pool })
    }

    pub fn schema_version(&self) -> RbResult<u32> {
        self.with_reader(migrations::current_version)
    }

    fn with_reader<F, T>(&self, f: F) -> RbResult<T>
    where
        F: FnOnce(&Connection) -> RbResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }
}

fn window_start(now: DateTime<Utc>, window: Duration) -> RbResult<DateTime<Utc>> {
    let window = chrono::Duration::from_std(window).map_err(|e| ReasoningBankError::InvalidInput {
        field: "window".into(),
        reason: e.to_string(),
    })?;
    Ok(now.checked_sub_signed(window).unwrap_or(DateTime::<Utc>::MIN_UTC))
}

impl ISignalStore for SignalStore {
    #[instrument(skip(self, signal), fields(memory_id = %signal.memory_id, signal_type = %signal.signal_type))]
    fn store_signal(&self, signal: &Signal) -> RbResult<()> {
        let row_id = self
            .pool
            .writer
            .with_conn_sync(|conn| signal_ops::insert_signal(conn, signal))?;
        debug!(row_id, positive = signal.positive, "signal stored");
        Ok(())
    }

    fn get_recent_signals(&self, memory_id: &str, window: Duration) -> RbResult<Vec<Signal>> {
        let now = Utc::now();
        let since = window_start(now, window)?;
        self.with_reader(|conn| signal_ops::signals_between(conn, memory_id, since, now))
    }

    fn claim_unlearned_signals(
        &self,
        memory_id: &str,
        window: Duration,
        types: &[SignalType],
    ) -> RbResult<Vec<Signal>> {
        if types.is_empty() {
            return Ok(Vec::new());
        }
        let now = Utc::now();
        let since = window_start(now, window)?;
        self.pool.writer.with_conn_sync(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(format!("claim begin: {e}")))?;
            match claim_inner(&tx, memory_id, since, now, types) {
                Ok(claimed) => {
                    tx.commit()
                        .map_err(|e| to_storage_err(format!("claim commit: {e}")))?;
                    Ok(claimed)
                }
                Err(e) => {
                    let _ = tx.rollback();
                    Err(e)
                }
            }
        })
    }

    fn get_project_weights(&self, project_id: &str) -> RbResult<ProjectWeights> {
        let stored = self.with_reader(|conn| weights_ops::get_weights(conn, project_id))?;
        Ok(stored.unwrap_or_else(|| ProjectWeights::uniform(project_id)))
    }

    fn store_project_weights(&self, weights: &ProjectWeights) -> RbResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| weights_ops::upsert_weights(conn, weights))
    }

    fn register_memory(&self, memory_id: &str, project_id: &str) -> RbResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| aggregate_ops::ensure_aggregate(conn, memory_id, project_id))
    }

    fn memory_project(&self, memory_id: &str) -> RbResult<Option<String>> {
        self.with_reader(|conn| aggregate_ops::get_project(conn, memory_id))
    }

    fn get_aggregate(&self, memory_id: &str) -> RbResult<SignalAggregate> {
        self.with_reader(|conn| aggregate_ops::get_aggregate(conn, memory_id))
    }

    #[instrument(skip(self))]
    fn roll_up_expired(&self, memory_id: &str, window: Duration) -> RbResult<usize> {
        let cutoff = window_start(Utc::now(), window)?;
        let folded = self.pool.writer.with_conn_sync(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(format!("roll_up begin: {e}")))?;
            match roll_up_inner(&tx, memory_id, cutoff) {
                Ok(n) => {
                    tx.commit()
                        .map_err(|e| to_storage_err(format!("roll_up commit: {e}")))?;
                    Ok(n)
                }
                Err(e) => {
                    let _ = tx.rollback();
                    Err(e)
                }
            }
        })?;
        if folded > 0 {
            debug!(folded, "expired signals folded into aggregate");
        }
        Ok(folded)
    }

    fn signal_count(&self, memory_id: &str) -> RbResult<usize> {
        self.with_reader(|conn| signal_ops::count_signals(conn, memory_id))
    }
}

fn roll_up_inner(conn: &Connection, memory_id: &str, cutoff: DateTime<Utc>) -> RbResult<usize> {
    let expired = signal_ops::unfolded_before(conn, memory_id, cutoff)?;
    let Some((_, first)) = expired.first() else {
        return Ok(0);
    };
    aggregate_ops::ensure_aggregate(conn, memory_id, &first.project_id)?;

    let mut delta = SignalAggregate::default();
    let mut ids = Vec::with_capacity(expired.len());
    for (id, signal) in &expired {
        delta.record(signal.signal_type, signal.positive);
        ids.push(*id);
    }
    aggregate_ops::add_to_aggregate(conn, memory_id, &delta)?;
    signal_ops::mark_folded(conn, &ids)?;
    Ok(ids.len())
}

fn claim_inner(
    conn: &Connection,
    memory_id: &str,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
    types: &[SignalType],
) -> RbResult<Vec<Signal>> {
    let (ids, claimed): (Vec<i64>, Vec<Signal>) =
        signal_ops::unlearned_between(conn, memory_id, since, until)?
            .into_iter()
            .filter(|(_, s)| types.contains(&s.signal_type))
            .unzip();
    signal_ops::mark_learned(conn, &ids)?;
    Ok(claimed)
}
