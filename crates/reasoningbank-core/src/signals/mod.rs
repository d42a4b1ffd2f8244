//! Feedback signals, their lifetime aggregate, and per-project reliability weights.

pub mod aggregate;
pub mod signal;
pub mod weights;

pub use aggregate::SignalAggregate;
pub use signal::{Signal, SignalType};
pub use weights::{BetaParams, LearningTally, ProjectWeights};
