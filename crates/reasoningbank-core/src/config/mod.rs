//! Workspace configuration, loaded from TOML. Every section and field is
//! optional and falls back to [`defaults`].

pub mod defaults;
mod embedding_config;
mod engine_config;
mod observability_config;
mod storage_config;
mod vector_config;

pub use embedding_config::EmbeddingConfig;
pub use engine_config::EngineConfig;
pub use observability_config::ObservabilityConfig;
pub use storage_config::StorageConfig;
pub use vector_config::VectorConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{RbResult, ReasoningBankError};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasoningBankConfig {
    pub storage: StorageConfig,
    pub engine: EngineConfig,
    pub embedding: EmbeddingConfig,
    pub vector: VectorConfig,
    pub observability: ObservabilityConfig,
}

impl ReasoningBankConfig {
    /// Parse and validate a TOML document. An empty string yields the defaults.
    pub fn from_toml(toml_str: &str) -> RbResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ReasoningBankError::ConfigError {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> RbResult<()> {
        let unit = |name: &str, v: f64| -> RbResult<()> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(ReasoningBankError::ConfigError {
                    reason: format!("{name} must be within [0, 1], got {v}"),
                })
            }
        };
        unit("engine.min_confidence", self.engine.min_confidence)?;
        unit(
            "engine.explicit_record_confidence",
            self.engine.explicit_record_confidence,
        )?;

        let strength = self.engine.declared_prior_strength;
        if strength.is_nan() || strength < 0.0 {
            return Err(ReasoningBankError::ConfigError {
                reason: "engine.declared_prior_strength must be non-negative".into(),
            });
        }
        if self.engine.recent_window_secs == 0 {
            return Err(ReasoningBankError::ConfigError {
                reason: "engine.recent_window_secs must be positive".into(),
            });
        }
        if self.engine.search_overfetch_factor == 0 {
            return Err(ReasoningBankError::ConfigError {
                reason: "engine.search_overfetch_factor must be at least 1".into(),
            });
        }
        if self.embedding.dimensions == 0 {
            return Err(ReasoningBankError::ConfigError {
                reason: "embedding.dimensions must be positive".into(),
            });
        }
        if self.storage.read_pool_size == 0 {
            return Err(ReasoningBankError::ConfigError {
                reason: "storage.read_pool_size must be at least 1".into(),
            });
        }
        if self.vector.collection_prefix.trim().is_empty() {
            return Err(ReasoningBankError::ConfigError {
                reason: "vector.collection_prefix must not be empty".into(),
            });
        }
        Ok(())
    }
}
