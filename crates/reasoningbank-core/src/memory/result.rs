use serde::{Deserialize, Serialize};

use super::confidence::Confidence;

/// One search hit as returned to callers.
///
/// Title and content have been re-scrubbed on the way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryResult {
    pub id: String,
    pub title: String,
    pub content: String,
    pub confidence: Confidence,
    /// Similarity reported by the vector store. Results keep the store's order.
    pub score: f64,
    pub tags: Vec<String>,
}
