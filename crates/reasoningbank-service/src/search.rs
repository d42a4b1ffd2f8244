use reasoningbank_core::constants::CONFIDENCE_KEY;
use reasoningbank_core::errors::RbResult;
use reasoningbank_core::memory::MemoryResult;
use reasoningbank_core::traits::{Condition, Filter, ScoredPoint};
use reasoningbank_core::OperationContext;
use reasoningbank_observability::search_span;
use tracing::{debug, warn};

use crate::bank::{require_non_blank, ReasoningBank};
use crate::metadata::from_metadata;

impl ReasoningBank {
    /// Memories of `project_id` most similar to `query` whose current
    /// confidence is at least `min_confidence`, best first.
    ///
    /// A zero limit, a blank query, an unknown project or an empty collection
    /// all give an empty result.
    pub fn search(&self, project_id: &str, query: &str, limit: usize) -> RbResult<Vec<MemoryResult>> {
        require_non_blank("project_id", project_id)?;
        let _span = search_span!(project_id, limit).entered();
        if limit == 0 || query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let (collection, base) = self.scope(project_id);
        let gate = Condition::at_least(CONFIDENCE_KEY, self.config.engine.min_confidence);
        let embedding = self.embedder.embed_query(query).during("search")?;

        let hits = if self.vectors.supports_range_filters() {
            let filter = base.must(gate);
            self.vectors
                .search(&collection, &embedding, limit, &filter)
                .during("search")?
        } else {
            self.post_filtered(&collection, &embedding, limit, &base, &gate)?
        };

        let mut results = Vec::with_capacity(hits.len());
        for hit in hits {
            let score = hit.score;
            let memory = from_metadata(hit.metadata).during("search")?;
            results.push(MemoryResult {
                id: memory.id().to_string(),
                title: self.scrub(&memory.title).during("search")?,
                content: self.scrub(&memory.content).during("search")?,
                confidence: memory.confidence,
                score,
                tags: memory.tags.into_iter().collect(),
            });
        }
        debug!(collection = %collection, returned = results.len(), "search complete");
        Ok(results)
    }

    /// Confidence gate applied client side, for stores without range filters.
    ///
    /// Over-fetches by the configured factor and keeps widening the window
    /// until `limit` gated hits are found or the collection is exhausted.
    fn post_filtered(
        &self,
        collection: &str,
        embedding: &[f32],
        limit: usize,
        base: &Filter,
        gate: &Condition,
    ) -> RbResult<Vec<ScoredPoint>> {
        warn!(collection, "vector store lacks range filters; gating confidence client side");
        let mut fetch = limit.saturating_mul(self.config.engine.search_overfetch_factor);
        loop {
            let raw = self
                .vectors
                .search(collection, embedding, fetch, base)
                .during("search")?;
            let exhausted = raw.len() < fetch;
            let kept: Vec<ScoredPoint> = raw
                .into_iter()
                .filter(|hit| gate.matches(&hit.metadata))
                .take(limit)
                .collect();
            if kept.len() == limit || exhausted || fetch == usize::MAX {
                debug!(collection, fetch, kept = kept.len(), "post-filter done");
                return Ok(kept);
            }
            fetch = fetch.saturating_mul(2);
        }
    }
}
