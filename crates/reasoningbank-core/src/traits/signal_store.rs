use std::time::Duration;

use crate::errors::RbResult;
use crate::signals::{ProjectWeights, Signal, SignalAggregate, SignalType};

/// Append-only signal log, lifetime aggregates, and per-project weights.
///
/// Implementations must be safe to share across threads. Appends for the same
/// memory from concurrent writers must all land.
pub trait ISignalStore: Send + Sync {
    /// Append one signal.
    fn store_signal(&self, signal: &Signal) -> RbResult<()>;

    /// Signals for `memory_id` with a timestamp in `[now - window, now]`, any order.
    fn get_recent_signals(&self, memory_id: &str, window: Duration) -> RbResult<Vec<Signal>>;

    /// Signals of the given types in `[now - window, now]` that have not been
    /// claimed before, oldest first. Claimed signals are marked in the same
    /// write, so each signal is returned by at most one call.
    fn claim_unlearned_signals(
        &self,
        memory_id: &str,
        window: Duration,
        types: &[SignalType],
    ) -> RbResult<Vec<Signal>>;

    /// Stored weights for the project, or the uniform prior if none exist.
    /// Never fails for an unknown project.
    fn get_project_weights(&self, project_id: &str) -> RbResult<ProjectWeights>;

    /// Persist weights. Callers serialize updates per project.
    fn store_project_weights(&self, weights: &ProjectWeights) -> RbResult<()>;

    /// Create the (empty) aggregate row for a memory. Idempotent.
    fn register_memory(&self, memory_id: &str, project_id: &str) -> RbResult<()>;

    /// Project a registered memory belongs to.
    fn memory_project(&self, memory_id: &str) -> RbResult<Option<String>>;

    /// Lifetime counters for signals that have left the recency window.
    fn get_aggregate(&self, memory_id: &str) -> RbResult<SignalAggregate>;

    /// Fold every signal older than `window` that is not yet counted into the
    /// aggregate. Each signal is folded at most once. Returns how many were folded.
    fn roll_up_expired(&self, memory_id: &str, window: Duration) -> RbResult<usize>;

    /// Total number of stored signals for a memory.
    fn signal_count(&self, memory_id: &str) -> RbResult<usize>;
}
