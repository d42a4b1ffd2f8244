//! Integration test: data survives close and reopen.

use std::time::Duration;

use chrono::Utc;
use reasoningbank_core::signals::{ProjectWeights, Signal, SignalType};
use reasoningbank_core::traits::ISignalStore;
use reasoningbank_storage::SignalStore;

#[test]
fn weights_and_aggregates_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bank.db");

    {
        let store = SignalStore::open(&path).unwrap();
        store.register_memory("m1", "proj").unwrap();
        let old = Signal::new("m1", "proj", SignalType::Outcome, true)
            .unwrap()
            .at(Utc::now() - chrono::Duration::days(9));
        store.store_signal(&old).unwrap();
        store
            .roll_up_expired("m1", Duration::from_secs(7 * 24 * 3600))
            .unwrap();

        let mut w = ProjectWeights::uniform("proj");
        w.learn_from_feedback(true, &[old]);
        store.store_project_weights(&w).unwrap();
    }

    let store = SignalStore::open(&path).unwrap();
    assert_eq!(store.memory_project("m1").unwrap().as_deref(), Some("proj"));
    assert_eq!(store.get_aggregate("m1").unwrap().counts(SignalType::Outcome), (1, 0));
    let w = store.get_project_weights("proj").unwrap();
    assert_eq!(w.outcome.alpha, 2.0);
    assert_eq!(w.outcome.beta, 1.0);
    assert_eq!(w.explicit.alpha, 1.0);
}

#[test]
fn roll_up_without_registration_creates_aggregate() {
    let store = SignalStore::open_in_memory().unwrap();
    let old = Signal::new("orphan", "proj", SignalType::Usage, false)
        .unwrap()
        .at(Utc::now() - chrono::Duration::days(30));
    store.store_signal(&old).unwrap();
    assert_eq!(store.roll_up_expired("orphan", Duration::from_secs(3600)).unwrap(), 1);
    assert_eq!(store.get_aggregate("orphan").unwrap().counts(SignalType::Usage), (0, 1));
}
