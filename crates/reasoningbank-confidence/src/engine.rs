use reasoningbank_core::memory::{Confidence, Memory};
use reasoningbank_core::signals::{ProjectWeights, Signal, SignalAggregate};

use crate::breakdown::{compute_breakdown, ConfidenceBreakdown};
use crate::prior::BetaPrior;

/// Recomputes memory confidence with the memory's declared confidence as prior.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceEngine {
    prior_strength: f64,
}

impl ConfidenceEngine {
    pub fn new(prior_strength: f64) -> Self {
        Self { prior_strength }
    }

    pub fn prior_for(&self, memory: &Memory) -> BetaPrior {
        BetaPrior::from_declared(memory.declared_confidence.value(), self.prior_strength)
    }

    pub fn breakdown(
        &self,
        memory: &Memory,
        aggregate: &SignalAggregate,
        recent_signals: &[Signal],
        weights: &ProjectWeights,
    ) -> ConfidenceBreakdown {
        compute_breakdown(self.prior_for(memory), aggregate, recent_signals, weights)
    }

    pub fn recompute(
        &self,
        memory: &Memory,
        aggregate: &SignalAggregate,
        recent_signals: &[Signal],
        weights: &ProjectWeights,
    ) -> Confidence {
        Confidence::new(self.breakdown(memory, aggregate, recent_signals, weights).confidence)
    }
}

impl Default for ConfidenceEngine {
    fn default() -> Self {
        Self::new(2.0)
    }
}
