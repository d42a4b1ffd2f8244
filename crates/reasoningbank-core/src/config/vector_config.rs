use serde::{Deserialize, Serialize};

use super::defaults;
use crate::traits::IsolationMode;

/// Vector store layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Shared collection name, or the prefix of per-tenant collections.
    pub collection_prefix: String,
    pub isolation: IsolationMode,
}

impl VectorConfig {
    pub fn collection_for(&self, project_id: &str) -> String {
        self.isolation.collection_for(&self.collection_prefix, project_id)
    }
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            collection_prefix: defaults::DEFAULT_COLLECTION_PREFIX.to_string(),
            isolation: IsolationMode::default(),
        }
    }
}
