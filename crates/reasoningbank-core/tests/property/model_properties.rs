use proptest::prelude::*;
use reasoningbank_core::signals::{ProjectWeights, Signal, SignalType};
use reasoningbank_core::Confidence;

fn signal_type() -> impl Strategy<Value = SignalType> {
    prop_oneof![
        Just(SignalType::Explicit),
        Just(SignalType::Usage),
        Just(SignalType::Outcome),
    ]
}

proptest! {
    #[test]
    fn confidence_always_in_unit_interval(v in proptest::num::f64::ANY) {
        let c = Confidence::new(v).value();
        prop_assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn learning_never_decreases_params(
        helpful in any::<bool>(),
        signals in prop::collection::vec((signal_type(), any::<bool>()), 0..40),
    ) {
        let mut weights = ProjectWeights::uniform("proj");
        let before = weights.clone();
        let contributing: Vec<Signal> = signals
            .iter()
            .map(|(t, pos)| Signal::new("m", "proj", *t, *pos).unwrap())
            .collect();
        let tally = weights.learn_from_feedback(helpful, &contributing);

        prop_assert_eq!(tally.applied(), contributing.len());
        for t in SignalType::ALL {
            let (b, a) = (before.params(t), weights.params(t));
            prop_assert!(a.alpha >= b.alpha);
            prop_assert!(a.beta >= b.beta);
            prop_assert!(a.alpha >= 1.0 && a.beta >= 1.0);
        }
        let total_before: f64 = SignalType::ALL.iter().map(|t| before.params(*t).alpha + before.params(*t).beta).sum();
        let total_after: f64 = SignalType::ALL.iter().map(|t| weights.params(*t).alpha + weights.params(*t).beta).sum();
        prop_assert_eq!(total_after - total_before, contributing.len() as f64);
    }
}
