//! ReasoningBank: owns the collaborators and the per-memory lock map.

use std::path::Path;
use std::sync::Arc;

use reasoningbank_confidence::ConfidenceEngine;
use reasoningbank_core::config::ReasoningBankConfig;
use reasoningbank_core::errors::{RbResult, ReasoningBankError};
use reasoningbank_core::memory::Memory;
use reasoningbank_core::traits::{
    Filter, IEmbeddingProvider, ISanitizer, ISignalStore, IVectorStore,
};
use reasoningbank_core::OperationContext;
use reasoningbank_embeddings::EmbeddingEngine;
use reasoningbank_learning::{KeyedLocks, WeightLearner};
use reasoningbank_privacy::SecretScrubber;
use reasoningbank_storage::SignalStore;
use reasoningbank_vector::{InMemoryVectorStore, SqliteVectorStore};
use tracing::info;

use crate::metadata::from_metadata;

const IN_MEMORY: &str = ":memory:";

/// The memory engine. `Send + Sync`; share it behind an `Arc`.
pub struct ReasoningBank {
    pub(crate) signals: Arc<dyn ISignalStore>,
    pub(crate) vectors: Arc<dyn IVectorStore>,
    pub(crate) embedder: Arc<dyn IEmbeddingProvider>,
    pub(crate) sanitizer: Arc<dyn ISanitizer>,
    pub(crate) confidence: ConfidenceEngine,
    pub(crate) learner: WeightLearner,
    pub(crate) memory_locks: KeyedLocks,
    pub(crate) config: ReasoningBankConfig,
}

impl ReasoningBank {
    /// Assemble from explicit collaborators. The config is validated first.
    pub fn new(
        signals: Arc<dyn ISignalStore>,
        vectors: Arc<dyn IVectorStore>,
        embedder: Arc<dyn IEmbeddingProvider>,
        sanitizer: Arc<dyn ISanitizer>,
        config: ReasoningBankConfig,
    ) -> RbResult<Self> {
        config.validate()?;
        info!(
            embedder = embedder.name(),
            dims = embedder.dimensions(),
            isolation = ?vectors.isolation_mode(),
            range_filters = vectors.supports_range_filters(),
            "ReasoningBank initialized"
        );
        Ok(Self {
            learner: WeightLearner::new(Arc::clone(&signals)),
            confidence: ConfidenceEngine::new(config.engine.declared_prior_strength),
            memory_locks: KeyedLocks::new(),
            signals,
            vectors,
            embedder,
            sanitizer,
            config,
        })
    }

    /// Build the default stack: SQLite signal log, SQLite vector store in the
    /// same database file, hashed term-frequency embeddings, regex scrubber.
    ///
    /// `storage.db_path = ":memory:"` keeps everything in process.
    pub fn from_config(config: ReasoningBankConfig) -> RbResult<Self> {
        config.validate()?;
        let signals = Arc::new(SignalStore::from_config(&config.storage)?);
        let vectors: Arc<dyn IVectorStore> = if config.storage.db_path == IN_MEMORY {
            Arc::new(InMemoryVectorStore::with_options(config.vector.isolation, true))
        } else {
            Arc::new(SqliteVectorStore::open(
                Path::new(&config.storage.db_path),
                config.vector.isolation,
                config.storage.busy_timeout_ms,
            )?)
        };
        let embedder = Arc::new(EmbeddingEngine::from_config(&config.embedding)?);
        Self::new(signals, vectors, embedder, Arc::new(SecretScrubber::new()), config)
    }

    /// Parse a TOML config and build the default stack from it.
    pub fn from_toml(toml_str: &str) -> RbResult<Self> {
        Self::from_config(ReasoningBankConfig::from_toml(toml_str)?)
    }

    /// Fully in-process instance with default settings.
    pub fn open_in_memory() -> RbResult<Self> {
        let mut config = ReasoningBankConfig::default();
        config.storage.db_path = IN_MEMORY.to_string();
        Self::from_config(config)
    }

    pub fn config(&self) -> &ReasoningBankConfig {
        &self.config
    }

    /// Current learned weights for a project.
    pub fn project_weights(&self, project_id: &str) -> RbResult<reasoningbank_core::ProjectWeights> {
        self.learner.weights(project_id)
    }

    /// Number of memories recorded for a project. Unknown projects have zero.
    pub fn count(&self, project_id: &str) -> RbResult<usize> {
        require_non_blank("project_id", project_id)?;
        let (collection, filter) = self.scope(project_id);
        self.vectors.count(&collection, &filter).during("count")
    }

    /// Fetch one memory with title, content and description re-scrubbed.
    /// Unknown ids yield `None`.
    pub fn get(&self, memory_id: &str) -> RbResult<Option<Memory>> {
        require_non_blank("memory_id", memory_id)?;
        let Some(project_id) = self.signals.memory_project(memory_id).during("get")? else {
            return Ok(None);
        };
        let Some(mut memory) = self.load(&project_id, memory_id).during("get")? else {
            return Ok(None);
        };
        memory.title = self.scrub(&memory.title).during("get")?;
        memory.content = self.scrub(&memory.content).during("get")?;
        memory.description = self.scrub(&memory.description).during("get")?;
        Ok(Some(memory))
    }

    /// Collection and base filter for a tenant.
    pub(crate) fn scope(&self, project_id: &str) -> (String, Filter) {
        let mode = self.vectors.isolation_mode();
        let collection = mode.collection_for(&self.config.vector.collection_prefix, project_id);
        let filter = match mode.tenant_filter(project_id) {
            Some(cond) => Filter::new().must(cond),
            None => Filter::new(),
        };
        (collection, filter)
    }

    /// Stored memory, unscrubbed.
    pub(crate) fn load(&self, project_id: &str, memory_id: &str) -> RbResult<Option<Memory>> {
        let (collection, _) = self.scope(project_id);
        self.vectors
            .get(&collection, memory_id)?
            .map(|point| from_metadata(point.metadata))
            .transpose()
    }

    pub(crate) fn scrub(&self, text: &str) -> RbResult<String> {
        Ok(self.sanitizer.scrub(text)?.scrubbed)
    }
}

pub(crate) fn require_non_blank(field: &'static str, value: &str) -> RbResult<()> {
    if value.trim().is_empty() {
        return Err(ReasoningBankError::EmptyField { field });
    }
    Ok(())
}
