//! Global subscriber setup.

pub mod spans;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use reasoningbank_core::config::ObservabilityConfig;
use reasoningbank_core::errors::{RbResult, ReasoningBankError};

/// Install the global subscriber. `RUST_LOG` wins over `config.log_level`.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> RbResult<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json_logs {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };
    result.map_err(|e| ReasoningBankError::ConfigError {
        reason: format!("tracing subscriber: {e}"),
    })
}

/// The filter `init_tracing` would install.
pub fn build_filter(config: &ObservabilityConfig) -> RbResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| ReasoningBankError::ConfigError {
            reason: format!("observability.log_level '{}': {e}", config.log_level),
        }),
    }
}
