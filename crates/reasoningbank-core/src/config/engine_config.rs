use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Confidence and retrieval tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Search drops memories whose current confidence is below this.
    pub min_confidence: f64,
    /// Confidence assigned to explicitly authored memories at record time.
    pub explicit_record_confidence: f64,
    /// Signals newer than this are read individually; older ones are folded
    /// into the lifetime aggregate.
    pub recent_window_secs: u64,
    /// Pseudo-observations the declared confidence contributes to every recompute.
    pub declared_prior_strength: f64,
    /// Over-fetch multiplier used when the vector store cannot filter by range.
    pub search_overfetch_factor: usize,
}

impl EngineConfig {
    pub fn recent_window(&self) -> Duration {
        Duration::from_secs(self.recent_window_secs)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_confidence: defaults::DEFAULT_MIN_CONFIDENCE,
            explicit_record_confidence: defaults::DEFAULT_EXPLICIT_RECORD_CONFIDENCE,
            recent_window_secs: defaults::DEFAULT_RECENT_WINDOW_SECS,
            declared_prior_strength: defaults::DEFAULT_DECLARED_PRIOR_STRENGTH,
            search_overfetch_factor: defaults::DEFAULT_SEARCH_OVERFETCH_FACTOR,
        }
    }
}
