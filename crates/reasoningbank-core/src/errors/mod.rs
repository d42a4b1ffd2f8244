//! Error types for the ReasoningBank engine.
//!
//! Subsystem errors convert into [`ReasoningBankError`] via `#[from]`.
//! Collaborator failures are wrapped with the name of the service operation
//! that hit them ([`ReasoningBankError::OperationFailed`]); validation errors
//! are never wrapped.

mod embedding_error;
mod storage_error;
mod vector_error;

pub use embedding_error::EmbeddingError;
pub use storage_error::StorageError;
pub use vector_error::VectorStoreError;

/// Result alias used across the workspace.
pub type RbResult<T> = Result<T, ReasoningBankError>;

/// Top-level error for every ReasoningBank operation.
#[derive(Debug, thiserror::Error)]
pub enum ReasoningBankError {
    #[error("required field is empty: {field}")]
    EmptyField { field: &'static str },

    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("memory not found: {id}")]
    MemoryNotFound { id: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("vector store error: {0}")]
    VectorStoreError(#[from] VectorStoreError),

    #[error("sanitization failed: {reason}")]
    SanitizationError { reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config error: {reason}")]
    ConfigError { reason: String },

    #[error("{operation} failed: {source}")]
    OperationFailed {
        operation: &'static str,
        #[source]
        source: Box<ReasoningBankError>,
    },
}

impl ReasoningBankError {
    /// Whether this is an input validation failure (empty field, bad value,
    /// unknown memory id). These are surfaced synchronously and never retried.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyField { .. } | Self::InvalidInput { .. } | Self::MemoryNotFound { .. }
        )
    }

    /// Attach the name of the failing operation.
    ///
    /// Validation errors and already-wrapped errors pass through unchanged.
    pub fn in_operation(self, operation: &'static str) -> Self {
        if self.is_validation() || matches!(self, Self::OperationFailed { .. }) {
            return self;
        }
        Self::OperationFailed {
            operation,
            source: Box::new(self),
        }
    }

    /// The innermost error, unwrapping any `OperationFailed` layers.
    pub fn root(&self) -> &ReasoningBankError {
        match self {
            Self::OperationFailed { source, .. } => source.root(),
            other => other,
        }
    }

    /// The operation name, if this error was wrapped by a service operation.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::OperationFailed { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

/// Extension for tagging collaborator results with the operation name.
pub trait OperationContext<T> {
    fn during(self, operation: &'static str) -> RbResult<T>;
}

impl<T, E> OperationContext<T> for Result<T, E>
where
    E: Into<ReasoningBankError>,
{
    fn during(self, operation: &'static str) -> RbResult<T> {
        self.map_err(|e| e.into().in_operation(operation))
    }
}
