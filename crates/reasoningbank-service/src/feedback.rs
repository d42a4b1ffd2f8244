//! Signal ingestion: explicit feedback, usage, and task outcomes.

use reasoningbank_core::errors::{RbResult, ReasoningBankError};
use reasoningbank_core::memory::Confidence;
use reasoningbank_core::signals::{Signal, SignalType};
use reasoningbank_core::OperationContext;
use reasoningbank_observability::{feedback_span, learning_span};
use tracing::{debug, info};

use crate::bank::{require_non_blank, ReasoningBank};
use crate::metadata::confidence_patch;

/// Which preceding signals a new one teaches the weight learner about.
/// A preceding signal teaches the learner at most once.
#[derive(Debug, Clone, Copy)]
enum Learn {
    /// Usage is a prediction, not ground truth.
    Nothing,
    /// Every preceding signal in the window.
    AllPreceding,
    /// Preceding explicit and usage signals.
    PredictorsOnly,
}

impl Learn {
    fn types(self) -> &'static [SignalType] {
        match self {
            Learn::Nothing => &[],
            Learn::AllPreceding => &SignalType::ALL,
            Learn::PredictorsOnly => &[SignalType::Explicit, SignalType::Usage],
        }
    }
}

impl ReasoningBank {
    /// Rate a memory helpful or unhelpful. Returns the recomputed confidence.
    ///
    /// The rating is ground truth for the signals that preceded it in the
    /// recency window, so it also trains the project's signal weights.
    pub fn feedback(&self, memory_id: &str, helpful: bool) -> RbResult<f64> {
        self.ingest(memory_id, SignalType::Explicit, helpful, None, Learn::AllPreceding, "feedback")
    }

    /// Note that a memory was consulted and whether it seemed useful.
    pub fn record_usage(
        &self,
        memory_id: &str,
        positive: bool,
        session_id: Option<String>,
    ) -> RbResult<f64> {
        self.ingest(memory_id, SignalType::Usage, positive, session_id, Learn::Nothing, "record_usage")
    }

    /// Report whether the task a memory was used for succeeded.
    pub fn record_outcome(
        &self,
        memory_id: &str,
        success: bool,
        session_id: Option<String>,
    ) -> RbResult<f64> {
        self.ingest(
            memory_id,
            SignalType::Outcome,
            success,
            session_id,
            Learn::PredictorsOnly,
            "record_outcome",
        )
    }

    fn ingest(
        &self,
        memory_id: &str,
        signal_type: SignalType,
        positive: bool,
        session_id: Option<String>,
        learn: Learn,
        operation: &'static str,
    ) -> RbResult<f64> {
        require_non_blank("memory_id", memory_id)?;
        let _span = feedback_span!(memory_id, signal_type).entered();
        let project_id = self
            .signals
            .memory_project(memory_id)
            .during(operation)?
            .ok_or_else(|| ReasoningBankError::MemoryNotFound {
                id: memory_id.to_string(),
            })?;

        self.memory_locks.with_lock(memory_id, || {
            let window = self.config.engine.recent_window();
            let contributors = self
                .signals
                .claim_unlearned_signals(memory_id, window, learn.types())
                .during(operation)?;

            let signal = Signal::new(memory_id, project_id.as_str(), signal_type, positive)?
                .with_session(session_id);
            self.signals.store_signal(&signal).during(operation)?;

            let confidence = self.recompute(&project_id, memory_id, operation)?;
            info!(
                memory_id,
                project_id = %project_id,
                signal_type = %signal_type,
                positive,
                confidence = confidence.value(),
                "signal applied"
            );

            if !contributors.is_empty() {
                let _learn = learning_span!(project_id, contributors.len()).entered();
                let report = self
                    .learner
                    .learn(&project_id, positive, &contributors)
                    .during(operation)?;
                debug!(
                    agreements = report.agreements,
                    disagreements = report.disagreements,
                    "weights learned from {operation}"
                );
            }
            Ok(confidence.value())
        })
    }

    /// Fold expired signals, recompute from aggregate + window + weights with
    /// the declared confidence as prior, and write the result back.
    fn recompute(
        &self,
        project_id: &str,
        memory_id: &str,
        operation: &'static str,
    ) -> RbResult<Confidence> {
        let window = self.config.engine.recent_window();
        let folded = self.signals.roll_up_expired(memory_id, window).during(operation)?;
        if folded > 0 {
            debug!(memory_id, folded, "expired signals rolled up");
        }
        let aggregate = self.signals.get_aggregate(memory_id).during(operation)?;
        let recent = self.signals.get_recent_signals(memory_id, window).during(operation)?;
        let weights = self.signals.get_project_weights(project_id).during(operation)?;

        let mut memory = self
            .load(project_id, memory_id)
            .during(operation)?
            .ok_or_else(|| ReasoningBankError::MemoryNotFound {
                id: memory_id.to_string(),
            })?;
        let confidence = self.confidence.recompute(&memory, &aggregate, &recent, &weights);
        memory.set_confidence(confidence);

        let (collection, _) = self.scope(project_id);
        self.vectors
            .set_metadata(&collection, memory_id, confidence_patch(confidence, memory.updated_at))
            .during(operation)?;
        Ok(confidence)
    }
}
