//! # reasoningbank-confidence
//!
//! Turns a memory's feedback history into one confidence score.
//!
//! Every signal type `T` carries a project-learned reliability
//! `w_T = alpha_T / (alpha_T + beta_T)`. Positive signals add `w_T` to the
//! posterior alpha and negative signals add `w_T` to the posterior beta,
//! for both lifetime aggregate counts and individual recent signals. The
//! result is the posterior mean `alpha / (alpha + beta)`.
//!
//! All functions here are pure.

mod breakdown;
mod engine;
mod hybrid;
mod prior;

pub use breakdown::{compute_breakdown, ConfidenceBreakdown};
pub use engine::ConfidenceEngine;
pub use hybrid::{compute_confidence_from_hybrid, compute_confidence_with_prior};
pub use prior::BetaPrior;
