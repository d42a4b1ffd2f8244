use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use reasoningbank_core::config::EmbeddingConfig;
use reasoningbank_core::errors::{EmbeddingError, RbResult, ReasoningBankError};
use reasoningbank_core::traits::IEmbeddingProvider;
use reasoningbank_embeddings::{EmbeddingEngine, HashedTfEmbedder};

/// Counts calls and can lie about its width.
struct CountingProvider {
    calls: AtomicUsize,
    declared: usize,
    actual: usize,
}

impl IEmbeddingProvider for CountingProvider {
    fn embed_documents(&self, texts: &[String]) -> RbResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|_| vec![0.0; self.actual]).collect())
    }

    fn embed_query(&self, _text: &str) -> RbResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![0.0; self.actual])
    }

    fn dimensions(&self) -> usize {
        self.declared
    }

    fn name(&self) -> &str {
        "counting"
    }
}

#[test]
fn from_config_uses_configured_width() {
    let config = EmbeddingConfig {
        dimensions: 64,
        query_cache_size: 8,
    };
    let engine = EmbeddingEngine::from_config(&config).unwrap();
    assert_eq!(engine.dimensions(), 64);
    assert_eq!(engine.name(), "hashed-tf");
    assert_eq!(engine.embed_query("retry with backoff").unwrap().len(), 64);
}

#[test]
fn provider_width_must_match_config() {
    let err = EmbeddingEngine::new(Arc::new(HashedTfEmbedder::new(32)), 64, 8).err().unwrap();
    assert!(matches!(
        err,
        ReasoningBankError::EmbeddingError(EmbeddingError::DimensionMismatch { expected: 64, actual: 32 })
    ));
}

#[test]
fn query_embeddings_are_cached() {
    let provider = Arc::new(CountingProvider {
        calls: AtomicUsize::new(0),
        declared: 4,
        actual: 4,
    });
    let engine = EmbeddingEngine::new(provider.clone(), 4, 16).unwrap();
    engine.embed_query("same query").unwrap();
    engine.embed_query("same query").unwrap();
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    engine.embed_query("other query").unwrap();
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn documents_are_not_cached() {
    let provider = Arc::new(CountingProvider {
        calls: AtomicUsize::new(0),
        declared: 4,
        actual: 4,
    });
    let engine = EmbeddingEngine::new(provider.clone(), 4, 16).unwrap();
    let docs = vec!["a b".to_string()];
    engine.embed_documents(&docs).unwrap();
    engine.embed_documents(&docs).unwrap();
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn wrong_width_output_is_rejected() {
    let provider = Arc::new(CountingProvider {
        calls: AtomicUsize::new(0),
        declared: 4,
        actual: 3,
    });
    let engine = EmbeddingEngine::new(provider, 4, 16).unwrap();
    let err = engine.embed_query("q").unwrap_err();
    assert!(matches!(
        err,
        ReasoningBankError::EmbeddingError(EmbeddingError::DimensionMismatch { expected: 4, actual: 3 })
    ));
    assert!(engine.embed_documents(&["d".to_string()]).is_err());
}
