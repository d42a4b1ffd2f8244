use proptest::prelude::*;

use reasoningbank_confidence::compute_confidence_from_hybrid;
use reasoningbank_core::signals::{BetaParams, ProjectWeights, Signal, SignalAggregate, SignalType};

fn signal_type() -> impl Strategy<Value = SignalType> {
    prop_oneof![
        Just(SignalType::Explicit),
        Just(SignalType::Usage),
        Just(SignalType::Outcome),
    ]
}

fn params() -> impl Strategy<Value = BetaParams> {
    (1.0f64..500.0, 1.0f64..500.0).prop_map(|(a, b)| BetaParams::new(a, b))
}

fn weights() -> impl Strategy<Value = ProjectWeights> {
    (params(), params(), params()).prop_map(|(explicit, usage, outcome)| {
        let mut w = ProjectWeights::uniform("p");
        w.explicit = explicit;
        w.usage = usage;
        w.outcome = outcome;
        w
    })
}

fn signals(positive: bool) -> impl Strategy<Value = Vec<Signal>> {
    prop::collection::vec(signal_type(), 1..50).prop_map(move |types| {
        types
            .into_iter()
            .map(|t| Signal::new("m", "p", t, positive).unwrap())
            .collect()
    })
}

proptest! {
    #[test]
    fn no_evidence_is_half_for_any_weights(w in weights()) {
        let c = compute_confidence_from_hybrid(&SignalAggregate::default(), &[], &w);
        prop_assert!((c - 0.5).abs() < 0.01);
    }

    #[test]
    fn positive_only_raises_confidence(w in weights(), recent in signals(true)) {
        let c = compute_confidence_from_hybrid(&SignalAggregate::default(), &recent, &w);
        prop_assert!(c > 0.5);
    }

    #[test]
    fn negative_only_lowers_confidence(w in weights(), recent in signals(false)) {
        let c = compute_confidence_from_hybrid(&SignalAggregate::default(), &recent, &w);
        prop_assert!(c < 0.5);
    }

    #[test]
    fn positive_aggregate_counts_raise_confidence(w in weights(), t in signal_type(), n in 1u64..200) {
        let mut agg = SignalAggregate::default();
        for _ in 0..n {
            agg.record(t, true);
        }
        let c = compute_confidence_from_hybrid(&agg, &[], &w);
        prop_assert!(c > 0.5);
    }

    #[test]
    fn balanced_evidence_stays_near_half(w in weights(), t in signal_type(), n in 0u64..1_000) {
        let mut agg = SignalAggregate::default();
        for _ in 0..n {
            agg.record(t, true);
            agg.record(t, false);
        }
        let c = compute_confidence_from_hybrid(&agg, &[], &w);
        prop_assert!((c - 0.5).abs() < 0.1);
    }

    #[test]
    fn result_is_always_a_probability(
        w in weights(),
        recent in prop::collection::vec((signal_type(), any::<bool>()), 0..60),
    ) {
        let recent: Vec<Signal> = recent
            .into_iter()
            .map(|(t, p)| Signal::new("m", "p", t, p).unwrap())
            .collect();
        let c = compute_confidence_from_hybrid(&SignalAggregate::default(), &recent, &w);
        prop_assert!((0.0..=1.0).contains(&c));
    }
}
