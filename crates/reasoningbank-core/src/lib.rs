//! # reasoningbank-core
//!
//! Foundation crate for the ReasoningBank memory engine.
//! Defines the memory and signal data model, collaborator traits, errors,
//! config, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod memory;
pub mod signals;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ReasoningBankConfig;
pub use errors::{OperationContext, RbResult, ReasoningBankError};
pub use memory::{Confidence, Memory, MemoryOrigin, MemoryResult, Outcome};
pub use signals::{BetaParams, ProjectWeights, Signal, SignalAggregate, SignalType};
