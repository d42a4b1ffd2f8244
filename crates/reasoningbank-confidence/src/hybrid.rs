use reasoningbank_core::signals::{ProjectWeights, Signal, SignalAggregate};

use crate::breakdown::compute_breakdown;
use crate::prior::BetaPrior;

/// Confidence from the uniform prior, lifetime aggregate counts and recent
/// signals, each weighted by the project's learned channel reliability.
///
/// `recent_signals` is additional evidence on top of `aggregate`; callers must
/// not pass signals that are already counted in the aggregate.
pub fn compute_confidence_from_hybrid(
    aggregate: &SignalAggregate,
    recent_signals: &[Signal],
    weights: &ProjectWeights,
) -> f64 {
    compute_confidence_with_prior(BetaPrior::uniform(), aggregate, recent_signals, weights)
}

/// Same blend, starting from an arbitrary prior.
pub fn compute_confidence_with_prior(
    prior: BetaPrior,
    aggregate: &SignalAggregate,
    recent_signals: &[Signal],
    weights: &ProjectWeights,
) -> f64 {
    compute_breakdown(prior, aggregate, recent_signals, weights).confidence
}
