use crate::errors::RbResult;
use serde::{Deserialize, Serialize};

/// Result of scrubbing with metadata about what was redacted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrubResult {
    pub scrubbed: String,
    pub findings: Vec<Finding>,
}

impl ScrubResult {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// A single redaction applied during scrubbing. Offsets refer to the input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub category: String,
    pub placeholder: String,
    pub start: usize,
    pub end: usize,
}

/// Secret scrubbing. Applied before content is persisted and again on read.
pub trait ISanitizer: Send + Sync {
    /// Replace secrets in `text` with placeholders.
    fn scrub(&self, text: &str) -> RbResult<ScrubResult>;
}
