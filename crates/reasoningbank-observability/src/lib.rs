//! # reasoningbank-observability
//!
//! Subscriber initialization and the span macros every service operation opens.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, spans::names};
