//! EmbeddingEngine: the entry point for reasoningbank-embeddings.
//!
//! Wraps a provider, checks every vector's dimensionality against the
//! configured value, and caches query embeddings. Implements
//! `IEmbeddingProvider` so it can be used anywhere a provider is expected.

use std::sync::Arc;

use reasoningbank_core::config::EmbeddingConfig;
use reasoningbank_core::errors::{EmbeddingError, RbResult};
use reasoningbank_core::traits::IEmbeddingProvider;
use reasoningbank_observability::embedding_span;
use tracing::{debug, info};

use crate::cache::QueryCache;
use crate::providers::HashedTfEmbedder;

pub struct EmbeddingEngine {
    provider: Arc<dyn IEmbeddingProvider>,
    cache: QueryCache,
    dimensions: usize,
}

impl EmbeddingEngine {
    /// Wrap `provider`. Fails if it does not produce `dimensions`-wide vectors.
    pub fn new(
        provider: Arc<dyn IEmbeddingProvider>,
        dimensions: usize,
        cache_size: u64,
    ) -> RbResult<Self> {
        if provider.dimensions() != dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dimensions,
                actual: provider.dimensions(),
            }
            .into());
        }
        info!(
            provider = provider.name(),
            dims = dimensions,
            cache_size,
            "EmbeddingEngine initialized"
        );
        Ok(Self {
            provider,
            cache: QueryCache::new(cache_size),
            dimensions,
        })
    }

    /// Engine backed by the built-in hashed term-frequency provider.
    pub fn from_config(config: &EmbeddingConfig) -> RbResult<Self> {
        let provider = Arc::new(HashedTfEmbedder::new(config.dimensions));
        Self::new(provider, config.dimensions, config.query_cache_size)
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    fn check(&self, vector: &[f32]) -> RbResult<()> {
        if vector.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed_documents(&self, texts: &[String]) -> RbResult<Vec<Vec<f32>>> {
        let _span = embedding_span!(self.provider.name(), self.dimensions).entered();
        let vectors = self.provider.embed_documents(texts)?;
        if vectors.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("{} texts produced {} vectors", texts.len(), vectors.len()),
            }
            .into());
        }
        for v in &vectors {
            self.check(v)?;
        }
        Ok(vectors)
    }

    fn embed_query(&self, text: &str) -> RbResult<Vec<f32>> {
        let _span = embedding_span!(self.provider.name(), self.dimensions).entered();
        let key = QueryCache::key(self.provider.name(), text);
        if let Some(hit) = self.cache.get(&key) {
            debug!(key = %key, "query embedding cache hit");
            return Ok(hit);
        }
        let vector = self.provider.embed_query(text)?;
        self.check(&vector)?;
        self.cache.insert(key, vector.clone());
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        self.provider.name()
    }
}
