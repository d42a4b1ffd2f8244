use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::PROJECT_ID_KEY;
use crate::errors::RbResult;

/// Point metadata. Must carry a numeric `confidence` for memory points.
pub type Metadata = serde_json::Map<String, Value>;

/// A vector plus its metadata, addressed by id within a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorPoint {
    pub id: String,
    pub vector: Vec<f32>,
    pub metadata: Metadata,
}

/// A search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPoint {
    pub id: String,
    /// Cosine similarity to the query.
    pub score: f64,
    pub metadata: Metadata,
}

/// Summary of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub points_count: usize,
    pub dimensions: Option<usize>,
}

/// One metadata predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// `metadata[key] == value`.
    Equals { key: String, value: Value },
    /// Numeric range on `metadata[key]`, inclusive bounds.
    Range {
        key: String,
        gte: Option<f64>,
        lte: Option<f64>,
    },
}

impl Condition {
    pub fn equals(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn at_least(key: impl Into<String>, min: f64) -> Self {
        Self::Range {
            key: key.into(),
            gte: Some(min),
            lte: None,
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range { .. })
    }

    /// Evaluate against a point's metadata. Missing or non-numeric fields never
    /// satisfy a range.
    pub fn matches(&self, metadata: &Metadata) -> bool {
        match self {
            Self::Equals { key, value } => metadata.get(key) == Some(value),
            Self::Range { key, gte, lte } => {
                let Some(v) = metadata.get(key).and_then(Value::as_f64) else {
                    return false;
                };
                gte.map_or(true, |min| v >= min) && lte.map_or(true, |max| v <= max)
            }
        }
    }
}

/// Conjunction of conditions. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub must: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn must(mut self, condition: Condition) -> Self {
        self.must.push(condition);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
    }

    pub fn has_range(&self) -> bool {
        self.must.iter().any(Condition::is_range)
    }

    pub fn matches(&self, metadata: &Metadata) -> bool {
        self.must.iter().all(|c| c.matches(metadata))
    }
}

/// How a store keeps tenants apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsolationMode {
    /// One collection for everyone. Every query carries a tenant equality filter.
    Shared,
    /// One collection per tenant.
    #[default]
    PerTenantCollection,
}

impl IsolationMode {
    /// Collection that holds `tenant`'s points.
    ///
    /// Tenant ids are escaped so distinct tenants never share a collection name.
    pub fn collection_for(&self, prefix: &str, tenant: &str) -> String {
        match self {
            Self::Shared => prefix.to_string(),
            Self::PerTenantCollection => format!("{prefix}__{}", escape_tenant(tenant)),
        }
    }

    /// Extra condition every query for `tenant` must carry.
    pub fn tenant_filter(&self, tenant: &str) -> Option<Condition> {
        match self {
            Self::Shared => Some(Condition::equals(PROJECT_ID_KEY, tenant)),
            Self::PerTenantCollection => None,
        }
    }
}

fn escape_tenant(tenant: &str) -> String {
    let mut out = String::with_capacity(tenant.len());
    for b in tenant.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' {
            out.push(b as char);
        } else {
            out.push_str(&format!("_{b:02x}"));
        }
    }
    out
}

/// Vector similarity index.
///
/// Searching, counting or reading a collection that does not exist yields an
/// empty result, not an error.
pub trait IVectorStore: Send + Sync {
    /// Insert or replace a point. Creates the collection on first write.
    fn upsert(&self, collection: &str, point: VectorPoint) -> RbResult<()>;

    /// Top `limit` points by cosine similarity that satisfy `filter`, best first.
    fn search(
        &self,
        collection: &str,
        query: &[f32],
        limit: usize,
        filter: &Filter,
    ) -> RbResult<Vec<ScoredPoint>>;

    /// Fetch one point.
    fn get(&self, collection: &str, id: &str) -> RbResult<Option<VectorPoint>>;

    /// Merge `patch` into an existing point's metadata.
    fn set_metadata(&self, collection: &str, id: &str, patch: Metadata) -> RbResult<()>;

    /// Number of points matching `filter`.
    fn count(&self, collection: &str, filter: &Filter) -> RbResult<usize>;

    fn list_collections(&self) -> RbResult<Vec<String>>;

    fn collection_info(&self, collection: &str) -> RbResult<Option<CollectionInfo>>;

    /// Tenant isolation mode this store instance was configured with.
    fn isolation_mode(&self) -> IsolationMode;

    /// Whether `search` and `count` accept [`Condition::Range`].
    fn supports_range_filters(&self) -> bool;
}
