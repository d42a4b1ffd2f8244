/// Vector store errors.
#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("filter not supported by this store: {condition}")]
    UnsupportedFilter { condition: String },

    #[error("dimension mismatch in collection {collection}: expected {expected}, got {actual}")]
    DimensionMismatch {
        collection: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid metadata field {key}: {reason}")]
    InvalidMetadata { key: String, reason: String },

    #[error("point {id} not found in collection {collection}")]
    PointNotFound { collection: String, id: String },

    #[error("backend failure: {reason}")]
    BackendFailure { reason: String },
}
