//! One span per service operation. Fields are recorded at span creation.

/// Span for `record`.
#[macro_export]
macro_rules! record_span {
    ($project_id:expr, $origin:expr) => {
        tracing::info_span!("reasoningbank.record", project_id = %$project_id, origin = ?$origin)
    };
}

/// Span for `search`.
#[macro_export]
macro_rules! search_span {
    ($project_id:expr, $limit:expr) => {
        tracing::info_span!("reasoningbank.search", project_id = %$project_id, limit = $limit)
    };
}

/// Span for `feedback` and the instrumentation signals.
#[macro_export]
macro_rules! feedback_span {
    ($memory_id:expr, $signal_type:expr) => {
        tracing::info_span!(
            "reasoningbank.feedback",
            memory_id = %$memory_id,
            signal_type = %$signal_type
        )
    };
}

/// Span for a weight learning pass.
#[macro_export]
macro_rules! learning_span {
    ($project_id:expr, $signals:expr) => {
        tracing::info_span!("reasoningbank.learning", project_id = %$project_id, signals = $signals)
    };
}

/// Span for an embedding call.
#[macro_export]
macro_rules! embedding_span {
    ($provider:expr, $dimensions:expr) => {
        tracing::debug_span!("reasoningbank.embedding", provider = %$provider, dimensions = $dimensions)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RECORD: &str = "reasoningbank.record";
    pub const SEARCH: &str = "reasoningbank.search";
    pub const FEEDBACK: &str = "reasoningbank.feedback";
    pub const LEARNING: &str = "reasoningbank.learning";
    pub const EMBEDDING: &str = "reasoningbank.embedding";
}
