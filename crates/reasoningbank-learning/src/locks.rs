//! Per-key mutual exclusion.

use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;

/// One mutex per key, created on first use and dropped once no caller holds
/// or waits on it. Different keys never contend.
#[derive(Default)]
pub struct KeyedLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `key`.
    pub fn with_lock<T>(&self, key: &str, f: impl FnOnce() -> T) -> T {
        // Clone the Arc out so the DashMap shard is released before blocking.
        let lock = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        // The guarded value is `()`, so a poisoned lock carries no bad state.
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let out = f();
        drop(guard);
        drop(lock);
        // Only the map's own reference left: nobody holds or waits on this key.
        self.locks.remove_if(key, |_, lock| Arc::strong_count(lock) == 1);
        out
    }

    /// Number of keys currently locked or waited on.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn same_key_is_exclusive() {
        let locks = Arc::new(KeyedLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let (locks, inside, max_seen) = (locks.clone(), inside.clone(), max_seen.clone());
                thread::spawn(move || {
                    locks.with_lock("k", || {
                        let n = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(n, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(2));
                        inside.fetch_sub(1, Ordering::SeqCst);
                    })
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
        assert!(locks.is_empty());
    }

    #[test]
    fn returns_closure_value() {
        let locks = KeyedLocks::new();
        assert_eq!(locks.with_lock("a", || 41 + 1), 42);
    }

    #[test]
    fn idle_keys_are_released() {
        let locks = KeyedLocks::new();
        for i in 0..100 {
            locks.with_lock(&format!("memory-{i}"), || ());
        }
        assert_eq!(locks.len(), 0);

        let held = locks.with_lock("outer", || locks.len());
        assert_eq!(held, 1);
        assert!(locks.is_empty());
    }
}
