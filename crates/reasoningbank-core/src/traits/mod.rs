pub mod embedding;
pub mod sanitizer;
pub mod signal_store;
pub mod vector_store;

pub use embedding::IEmbeddingProvider;
pub use sanitizer::{Finding, ISanitizer, ScrubResult};
pub use signal_store::ISignalStore;
pub use vector_store::{
    CollectionInfo, Condition, Filter, IVectorStore, IsolationMode, Metadata, ScoredPoint,
    VectorPoint,
};
