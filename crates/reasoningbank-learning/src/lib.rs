//! # reasoningbank-learning
//!
//! Calibrates how far each signal channel can be trusted, per project, by
//! comparing the channel's past predictions with later ground truth.

pub mod learner;
pub mod locks;

pub use learner::{LearningReport, WeightLearner};
pub use locks::KeyedLocks;
