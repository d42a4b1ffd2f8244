use std::time::Duration;

use chrono::Utc;
use proptest::prelude::*;
use reasoningbank_core::signals::{Signal, SignalAggregate, SignalType};
use reasoningbank_core::traits::ISignalStore;
use reasoningbank_storage::SignalStore;

fn signal_type() -> impl Strategy<Value = SignalType> {
    prop_oneof![
        Just(SignalType::Explicit),
        Just(SignalType::Usage),
        Just(SignalType::Outcome),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Every signal is counted exactly once: either in the aggregate or in the
    /// recent list, never both.
    #[test]
    fn aggregate_and_recent_partition_the_log(
        events in prop::collection::vec((signal_type(), any::<bool>(), 0i64..20), 1..30),
        window_days in 1u64..10,
    ) {
        let store = SignalStore::open_in_memory().unwrap();
        store.register_memory("m", "p").unwrap();
        let now = Utc::now();
        let mut expected = SignalAggregate::default();
        for (t, positive, days) in &events {
            let s = Signal::new("m", "p", *t, *positive)
                .unwrap()
                .at(now - chrono::Duration::days(*days) - chrono::Duration::minutes(1));
            store.store_signal(&s).unwrap();
            expected.record(*t, *positive);
        }

        let window = Duration::from_secs(window_days * 24 * 3600);
        store.roll_up_expired("m", window).unwrap();
        store.roll_up_expired("m", window).unwrap();

        let mut seen = store.get_aggregate("m").unwrap();
        for s in store.get_recent_signals("m", window).unwrap() {
            seen.record(s.signal_type, s.positive);
        }
        prop_assert_eq!(seen, expected);
    }
}
