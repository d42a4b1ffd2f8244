//! Integration test: concurrent appends through the single writer.

use std::sync::Arc;
use std::time::Duration;

use reasoningbank_core::signals::{Signal, SignalType};
use reasoningbank_core::traits::ISignalStore;
use reasoningbank_storage::SignalStore;

const WEEK: Duration = Duration::from_secs(7 * 24 * 3600);

#[test]
fn concurrent_appends_to_one_memory_all_land() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SignalStore::open(&dir.path().join("signals.db")).unwrap());
    store.register_memory("hot", "proj").unwrap();

    let mut handles = vec![];
    for t in 0..8 {
        let store = Arc::clone(&store);
        handles.push(std::thread::spawn(move || {
            for i in 0..10 {
                let s = Signal::new("hot", "proj", SignalType::Explicit, (t + i) % 2 == 0)
                    .unwrap()
                    .with_session(Some(format!("thread-{t}")));
                store.store_signal(&s).unwrap();
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.signal_count("hot").unwrap(), 80);
    assert_eq!(store.get_recent_signals("hot", WEEK).unwrap().len(), 80);
}

#[test]
fn concurrent_reads_during_writes() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SignalStore::open(&dir.path().join("rw.db")).unwrap());
    for m in 0..4 {
        store.register_memory(&format!("m{m}"), "proj").unwrap();
    }

    let writer = {
        let store = Arc::clone(&store);
        std::thread::spawn(move || {
            for i in 0..40 {
                let s = Signal::new(format!("m{}", i % 4), "proj", SignalType::Usage, true).unwrap();
                store.store_signal(&s).unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|r| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..20 {
                    let recent = store.get_recent_signals(&format!("m{r}"), WEEK).unwrap();
                    assert!(recent.len() <= 10);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
    for m in 0..4 {
        assert_eq!(store.signal_count(&format!("m{m}")).unwrap(), 10);
    }
}
