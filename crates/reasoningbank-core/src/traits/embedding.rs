use crate::errors::RbResult;

/// Embedding generation provider.
///
/// Vectors are L2-normalised so cosine similarity equals the dot product.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a batch of documents.
    fn embed_documents(&self, texts: &[String]) -> RbResult<Vec<Vec<f32>>>;

    /// Embed a single search query.
    fn embed_query(&self, text: &str) -> RbResult<Vec<f32>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
