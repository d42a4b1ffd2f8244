//! # reasoningbank-embeddings
//!
//! Deterministic, dependency-free document and query embeddings.
//! [`EmbeddingEngine`] wraps a provider with dimension checks and a query cache.

pub mod cache;
pub mod engine;
pub mod providers;

pub use cache::QueryCache;
pub use engine::EmbeddingEngine;
pub use providers::HashedTfEmbedder;
