//! # reasoningbank-vector
//!
//! Two [`IVectorStore`](reasoningbank_core::traits::IVectorStore) backends.
//! [`InMemoryVectorStore`] can be configured without range filter support to
//! exercise the service's post-filter path. [`SqliteVectorStore`] persists
//! points next to the signal log and scans them brute force.

pub mod memory_store;
pub mod similarity;
pub mod sqlite_store;

pub use memory_store::InMemoryVectorStore;
pub use sqlite_store::SqliteVectorStore;

use reasoningbank_core::constants::CONFIDENCE_KEY;
use reasoningbank_core::errors::{RbResult, VectorStoreError};
use reasoningbank_core::traits::{Filter, Metadata};

/// Reject range conditions on a store that cannot evaluate them.
pub(crate) fn check_filter(filter: &Filter, supports_range: bool) -> RbResult<()> {
    if supports_range {
        return Ok(());
    }
    if let Some(cond) = filter.must.iter().find(|c| c.is_range()) {
        return Err(VectorStoreError::UnsupportedFilter {
            condition: format!("{cond:?}"),
        }
        .into());
    }
    Ok(())
}

/// The filterable confidence field, when present, must be a number.
pub(crate) fn check_metadata(metadata: &Metadata) -> RbResult<()> {
    match metadata.get(CONFIDENCE_KEY) {
        Some(v) if !v.is_number() => Err(VectorStoreError::InvalidMetadata {
            key: CONFIDENCE_KEY.into(),
            reason: format!("expected a number, got {v}"),
        }
        .into()),
        _ => Ok(()),
    }
}

pub(crate) fn backend_err(reason: impl Into<String>) -> reasoningbank_core::ReasoningBankError {
    VectorStoreError::BackendFailure {
        reason: reason.into(),
    }
    .into()
}
