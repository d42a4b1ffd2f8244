use std::sync::Arc;

use reasoningbank_core::config::ReasoningBankConfig;
use reasoningbank_core::memory::{Memory, Outcome};
use reasoningbank_core::traits::IsolationMode;
use reasoningbank_embeddings::EmbeddingEngine;
use reasoningbank_privacy::SecretScrubber;
use reasoningbank_service::ReasoningBank;
use reasoningbank_storage::SignalStore;
use reasoningbank_vector::InMemoryVectorStore;

fn bank(overfetch: usize) -> ReasoningBank {
    let mut config = ReasoningBankConfig::default();
    config.engine.search_overfetch_factor = overfetch;
    ReasoningBank::new(
        Arc::new(SignalStore::open_in_memory().unwrap()),
        Arc::new(InMemoryVectorStore::with_options(IsolationMode::PerTenantCollection, false)),
        Arc::new(EmbeddingEngine::from_config(&config.embedding).unwrap()),
        Arc::new(SecretScrubber::new()),
        config,
    )
    .unwrap()
}

fn derived(content: &str, confidence: f64) -> Memory {
    Memory::derived("proj", "lock ordering", content, Outcome::Success, Vec::<String>::new(), confidence)
        .unwrap()
}

#[test]
fn post_filter_excludes_low_confidence() {
    let bank = bank(4);
    let good = bank.record(derived("take the memory lock before the project lock", 0.9)).unwrap();
    bank.record(derived("take the memory lock before the project lock", 0.2)).unwrap();

    let hits = bank.search("proj", "memory lock before project lock", 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, good);
}

#[test]
fn post_filter_fills_limit_past_low_confidence_neighbours() {
    let bank = bank(1);
    // The closest matches are all below the gate.
    for _ in 0..3 {
        bank.record(derived("take the memory lock before the project lock", 0.3)).unwrap();
    }
    let keep_a = bank.record(derived("memory lock first", 0.9)).unwrap();
    let keep_b = bank.record(derived("project lock second", 0.95)).unwrap();

    let hits = bank.search("proj", "take the memory lock before the project lock", 2).unwrap();
    let mut ids: Vec<_> = hits.iter().map(|h| h.id.clone()).collect();
    ids.sort();
    let mut expected = vec![keep_a, keep_b];
    expected.sort();
    assert_eq!(ids, expected);
    assert!(hits.iter().all(|h| h.confidence.value() >= 0.7));
}
