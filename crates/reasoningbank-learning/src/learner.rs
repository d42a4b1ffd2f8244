//! WeightLearner: the serialized load → learn → store cycle for one project.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use reasoningbank_core::errors::RbResult;
use reasoningbank_core::signals::{ProjectWeights, Signal};
use reasoningbank_core::traits::ISignalStore;

use crate::locks::KeyedLocks;

/// What one learning pass did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningReport {
    pub project_id: String,
    pub outcome_was_helpful: bool,
    pub signals_considered: usize,
    pub agreements: usize,
    pub disagreements: usize,
    /// Signals ignored because they belong to another project.
    pub skipped: usize,
    /// Whether the weights were written back.
    pub persisted: bool,
    pub weights: ProjectWeights,
}

/// Owns the per-project lock map so concurrent feedback for one project never
/// loses an update.
pub struct WeightLearner {
    store: Arc<dyn ISignalStore>,
    locks: KeyedLocks,
}

impl WeightLearner {
    pub fn new(store: Arc<dyn ISignalStore>) -> Self {
        Self {
            store,
            locks: KeyedLocks::new(),
        }
    }

    /// Compare each contributing signal with the ground truth and persist the
    /// updated weights. An empty contributing set performs no write.
    #[instrument(skip(self, contributing_signals), fields(signals = contributing_signals.len()))]
    pub fn learn(
        &self,
        project_id: &str,
        outcome_was_helpful: bool,
        contributing_signals: &[Signal],
    ) -> RbResult<LearningReport> {
        self.locks.with_lock(project_id, || {
            let mut weights = self.store.get_project_weights(project_id)?;
            if contributing_signals.is_empty() {
                return Ok(LearningReport {
                    project_id: project_id.to_string(),
                    outcome_was_helpful,
                    signals_considered: 0,
                    agreements: 0,
                    disagreements: 0,
                    skipped: 0,
                    persisted: false,
                    weights,
                });
            }

            let tally = weights.learn_from_feedback(outcome_was_helpful, contributing_signals);
            let persisted = tally.applied() > 0;
            if persisted {
                self.store.store_project_weights(&weights)?;
            }
            debug!(
                agreements = tally.agreements,
                disagreements = tally.disagreements,
                skipped = tally.skipped,
                explicit_w = weights.explicit.reliability(),
                usage_w = weights.usage.reliability(),
                outcome_w = weights.outcome.reliability(),
                "project weights updated"
            );

            Ok(LearningReport {
                project_id: project_id.to_string(),
                outcome_was_helpful,
                signals_considered: contributing_signals.len(),
                agreements: tally.agreements,
                disagreements: tally.disagreements,
                skipped: tally.skipped,
                persisted,
                weights,
            })
        })
    }

    /// Current weights for a project (uniform if none were learned yet).
    pub fn weights(&self, project_id: &str) -> RbResult<ProjectWeights> {
        self.store.get_project_weights(project_id)
    }
}
