use reasoningbank_core::errors::{EmbeddingError, RbResult};
use reasoningbank_core::memory::{Confidence, Memory, MemoryOrigin};
use reasoningbank_core::traits::VectorPoint;
use reasoningbank_core::OperationContext;
use reasoningbank_observability::record_span;
use tracing::{debug, info};

use crate::bank::ReasoningBank;
use crate::metadata::to_metadata;

impl ReasoningBank {
    /// Persist a memory and return its id.
    ///
    /// Title, content and description are scrubbed before anything is stored.
    /// Explicit memories get the explicit-record confidence; derived ones keep
    /// theirs. Validation fails before any side effect.
    pub fn record(&self, mut memory: Memory) -> RbResult<String> {
        memory.validate()?;
        let _span = record_span!(memory.project_id(), memory.origin).entered();

        let mut redactions = 0;
        for field in [&mut memory.title, &mut memory.content, &mut memory.description] {
            let result = self.sanitizer.scrub(field).during("record")?;
            redactions += result.findings.len();
            *field = result.scrubbed;
        }

        let confidence = match memory.origin {
            MemoryOrigin::Explicit => Confidence::new(self.config.engine.explicit_record_confidence),
            MemoryOrigin::Derived => memory.confidence,
        };
        memory.declare_confidence(confidence);

        let embedding = self
            .embedder
            .embed_documents(&[memory.embedding_text()])
            .during("record")?
            .pop()
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: "provider returned no vector".into(),
            })
            .during("record")?;

        let (collection, _) = self.scope(memory.project_id());
        let point = VectorPoint {
            id: memory.id().to_string(),
            vector: embedding,
            metadata: to_metadata(&memory).during("record")?,
        };
        // A point in the vector store always has a registered signal aggregate.
        self.signals
            .register_memory(memory.id(), memory.project_id())
            .during("record")?;
        self.vectors.upsert(&collection, point).during("record")?;

        if redactions > 0 {
            debug!(memory_id = memory.id(), redactions, "secrets scrubbed before persistence");
        }
        info!(
            memory_id = memory.id(),
            project_id = memory.project_id(),
            confidence = confidence.value(),
            collection = %collection,
            "memory recorded"
        );
        Ok(memory.id().to_string())
    }
}
