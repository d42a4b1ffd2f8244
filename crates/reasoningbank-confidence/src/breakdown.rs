use serde::{Deserialize, Serialize};

use reasoningbank_core::signals::{ProjectWeights, Signal, SignalAggregate, SignalType};

use crate::prior::BetaPrior;

/// Every intermediate value of one confidence computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub prior: BetaPrior,
    pub explicit_weight: f64,
    pub usage_weight: f64,
    pub outcome_weight: f64,
    /// Sum of `w_T` over positive evidence (aggregate + recent).
    pub weighted_positive: f64,
    /// Sum of `w_T` over negative evidence (aggregate + recent).
    pub weighted_negative: f64,
    pub alpha: f64,
    pub beta: f64,
    pub confidence: f64,
}

impl ConfidenceBreakdown {
    pub fn weight(&self, signal_type: SignalType) -> f64 {
        match signal_type {
            SignalType::Explicit => self.explicit_weight,
            SignalType::Usage => self.usage_weight,
            SignalType::Outcome => self.outcome_weight,
        }
    }
}

/// Run the blend and keep the working.
pub fn compute_breakdown(
    prior: BetaPrior,
    aggregate: &SignalAggregate,
    recent_signals: &[Signal],
    weights: &ProjectWeights,
) -> ConfidenceBreakdown {
    let weight = |t: SignalType| weights.reliability(t);

    let mut positive = 0.0;
    let mut negative = 0.0;
    for t in SignalType::ALL {
        let (pos, neg) = aggregate.counts(t);
        positive += pos as f64 * weight(t);
        negative += neg as f64 * weight(t);
    }
    for signal in recent_signals {
        if signal.positive {
            positive += weight(signal.signal_type);
        } else {
            negative += weight(signal.signal_type);
        }
    }

    let alpha = prior.alpha + positive;
    let beta = prior.beta + negative;
    let total = alpha + beta;
    let confidence = if total > 0.0 {
        (alpha / total).clamp(0.0, 1.0)
    } else {
        0.5
    };

    ConfidenceBreakdown {
        prior,
        explicit_weight: weight(SignalType::Explicit),
        usage_weight: weight(SignalType::Usage),
        outcome_weight: weight(SignalType::Outcome),
        weighted_positive: positive,
        weighted_negative: negative,
        alpha,
        beta,
        confidence,
    }
}
