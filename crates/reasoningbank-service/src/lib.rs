//! # reasoningbank-service
//!
//! [`ReasoningBank`] records project memories, serves confidence-gated
//! similarity search, and turns feedback signals into updated confidence and
//! learned per-project signal weights.

mod bank;
mod feedback;
mod metadata;
mod record;
mod search;

pub use bank::ReasoningBank;
