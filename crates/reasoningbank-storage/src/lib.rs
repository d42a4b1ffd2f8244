//! # reasoningbank-storage
//!
//! SQLite persistence for feedback signals. One writer connection behind a
//! mutex serializes writes; a small read pool serves queries in file-backed
//! mode. Schema is created by versioned migrations on open.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::SignalStore;

use reasoningbank_core::errors::{ReasoningBankError, StorageError};

/// Map any SQLite failure message into the workspace error.
pub fn to_storage_err(message: String) -> ReasoningBankError {
    StorageError::SqliteError { message }.into()
}
