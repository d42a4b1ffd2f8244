/// ReasoningBank engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Confidence assigned by `Memory::new` before any signal arrives.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Confidence assigned at record time to memories a user authored directly.
pub const EXPLICIT_RECORD_CONFIDENCE: f64 = 0.8;

/// Search-time cutoff: memories below this are never returned.
pub const MIN_CONFIDENCE: f64 = 0.7;

/// Default recency window for "fresh" signals (7 days).
pub const DEFAULT_RECENT_WINDOW_SECS: u64 = 7 * 24 * 60 * 60;

/// Metadata key carrying the filterable confidence value in the vector store.
pub const CONFIDENCE_KEY: &str = "confidence";

/// Metadata key carrying the tenant id in the vector store.
pub const PROJECT_ID_KEY: &str = "project_id";
