//! Default values for every config field.

// Storage
pub const DEFAULT_DB_PATH: &str = "reasoningbank.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

// Engine
pub const DEFAULT_MIN_CONFIDENCE: f64 = crate::constants::MIN_CONFIDENCE;
pub const DEFAULT_EXPLICIT_RECORD_CONFIDENCE: f64 = crate::constants::EXPLICIT_RECORD_CONFIDENCE;
pub const DEFAULT_RECENT_WINDOW_SECS: u64 = crate::constants::DEFAULT_RECENT_WINDOW_SECS;
pub const DEFAULT_DECLARED_PRIOR_STRENGTH: f64 = 2.0;
pub const DEFAULT_SEARCH_OVERFETCH_FACTOR: usize = 4;

// Embedding
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_QUERY_CACHE_SIZE: u64 = 10_000;

// Vector
pub const DEFAULT_COLLECTION_PREFIX: &str = "reasoningbank";

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
