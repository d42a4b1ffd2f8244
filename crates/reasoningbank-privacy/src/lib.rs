//! # reasoningbank-privacy
//!
//! Replaces credentials, tokens and connection strings in memory text with
//! fixed placeholders. Scrubbing is idempotent.

pub mod patterns;
mod scrubber;

pub use scrubber::SecretScrubber;
