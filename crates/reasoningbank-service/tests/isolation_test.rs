use std::sync::Arc;

use reasoningbank_core::config::ReasoningBankConfig;
use reasoningbank_core::memory::{Memory, Outcome};
use reasoningbank_core::traits::{IVectorStore, IsolationMode};
use reasoningbank_embeddings::EmbeddingEngine;
use reasoningbank_privacy::SecretScrubber;
use reasoningbank_service::ReasoningBank;
use reasoningbank_storage::SignalStore;
use reasoningbank_vector::InMemoryVectorStore;

fn bank(vectors: Arc<InMemoryVectorStore>) -> ReasoningBank {
    let config = ReasoningBankConfig::default();
    ReasoningBank::new(
        Arc::new(SignalStore::open_in_memory().unwrap()),
        vectors,
        Arc::new(EmbeddingEngine::from_config(&config.embedding).unwrap()),
        Arc::new(SecretScrubber::new()),
        config,
    )
    .unwrap()
}

fn memory(project: &str) -> Memory {
    Memory::new(project, "deploy order", "run migrations before deploying the api", Outcome::Success, ["ops"])
        .unwrap()
}

#[test]
fn shared_collection_never_leaks_across_projects() {
    let vectors = Arc::new(InMemoryVectorStore::with_options(IsolationMode::Shared, true));
    let bank = bank(vectors.clone());
    let a = bank.record(memory("proj-a")).unwrap();
    let b = bank.record(memory("proj-b")).unwrap();

    assert_eq!(vectors.list_collections().unwrap(), ["reasoningbank"]);

    let hits = bank.search("proj-a", "run migrations before deploying", 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, a);
    let hits = bank.search("proj-b", "run migrations before deploying", 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, b);

    assert_eq!(bank.count("proj-a").unwrap(), 1);
    assert!(bank.search("proj-c", "run migrations", 10).unwrap().is_empty());
}

#[test]
fn shared_collection_without_range_filters_still_isolates() {
    let vectors = Arc::new(InMemoryVectorStore::with_options(IsolationMode::Shared, false));
    let bank = bank(vectors);
    let a = bank.record(memory("proj-a")).unwrap();
    bank.record(memory("proj-b")).unwrap();

    let hits = bank.search("proj-a", "run migrations", 10).unwrap();
    assert_eq!(hits.iter().map(|h| h.id.as_str()).collect::<Vec<_>>(), [a.as_str()]);
}

#[test]
fn per_tenant_collections_are_separate() {
    let vectors = Arc::new(InMemoryVectorStore::new());
    let bank = bank(vectors.clone());
    let a = bank.record(memory("proj-a")).unwrap();
    bank.record(memory("proj-b")).unwrap();

    assert_eq!(
        vectors.list_collections().unwrap(),
        ["reasoningbank__proj-a", "reasoningbank__proj-b"]
    );
    let hits = bank.search("proj-a", "run migrations", 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, a);
}

#[test]
fn feedback_resolves_the_right_tenant() {
    let vectors = Arc::new(InMemoryVectorStore::with_options(IsolationMode::Shared, true));
    let bank = bank(vectors);
    let a = bank.record(memory("proj-a")).unwrap();
    let b = bank.record(memory("proj-b")).unwrap();

    bank.feedback(&a, false).unwrap();
    assert!(bank.get(&a).unwrap().unwrap().confidence.value() < 0.8);
    assert_eq!(bank.get(&b).unwrap().unwrap().confidence.value(), 0.8);
}
