//! In-process vector index keyed by collection name.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use reasoningbank_core::errors::{RbResult, VectorStoreError};
use reasoningbank_core::traits::{
    CollectionInfo, Filter, IVectorStore, IsolationMode, Metadata, ScoredPoint, VectorPoint,
};
use tracing::debug;

use crate::similarity::{cosine_similarity, rank};
use crate::{backend_err, check_filter, check_metadata};

#[derive(Default)]
struct Collection {
    dimensions: Option<usize>,
    points: HashMap<String, VectorPoint>,
}

impl Collection {
    fn check_dimensions(&self, name: &str, actual: usize) -> RbResult<()> {
        match self.dimensions {
            Some(expected) if expected != actual => Err(VectorStoreError::DimensionMismatch {
                collection: name.to_string(),
                expected,
                actual,
            }
            .into()),
            _ => Ok(()),
        }
    }
}

/// Brute-force in-memory store.
pub struct InMemoryVectorStore {
    collections: RwLock<BTreeMap<String, Collection>>,
    isolation: IsolationMode,
    range_filters: bool,
}

impl InMemoryVectorStore {
    /// Per-tenant collections with range filter support.
    pub fn new() -> Self {
        Self::with_options(IsolationMode::PerTenantCollection, true)
    }

    pub fn with_options(isolation: IsolationMode, range_filters: bool) -> Self {
        Self {
            collections: RwLock::new(BTreeMap::new()),
            isolation,
            range_filters,
        }
    }

    fn read(&self) -> RbResult<RwLockReadGuard<'_, BTreeMap<String, Collection>>> {
        self.collections
            .read()
            .map_err(|_| backend_err("collection lock poisoned"))
    }

    fn write(&self) -> RbResult<RwLockWriteGuard<'_, BTreeMap<String, Collection>>> {
        self.collections
            .write()
            .map_err(|_| backend_err("collection lock poisoned"))
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IVectorStore for InMemoryVectorStore {
    fn upsert(&self, collection: &str, point: VectorPoint) -> RbResult<()> {
        check_metadata(&point.metadata)?;
        let mut collections = self.write()?;
        let entry = collections.entry(collection.to_string()).or_default();
        entry.check_dimensions(collection, point.vector.len())?;
        entry.dimensions.get_or_insert(point.vector.len());
        debug!(collection, id = %point.id, "upsert point");
        entry.points.insert(point.id.clone(), point);
        Ok(())
    }

    fn search(
        &self,
        collection: &str,
        query: &[f32],
        limit: usize,
        filter: &Filter,
    ) -> RbResult<Vec<ScoredPoint>> {
        check_filter(filter, self.range_filters)?;
        let collections = self.read()?;
        let Some(entry) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        if limit == 0 {
            return Ok(Vec::new());
        }
        entry.check_dimensions(collection, query.len())?;
        let hits = entry
            .points
            .values()
            .filter(|p| filter.matches(&p.metadata))
            .map(|p| ScoredPoint {
                id: p.id.clone(),
                score: cosine_similarity(query, &p.vector),
                metadata: p.metadata.clone(),
            })
            .collect();
        Ok(rank(hits, limit))
    }

    fn get(&self, collection: &str, id: &str) -> RbResult<Option<VectorPoint>> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .and_then(|c| c.points.get(id))
            .cloned())
    }

    fn set_metadata(&self, collection: &str, id: &str, patch: Metadata) -> RbResult<()> {
        check_metadata(&patch)?;
        let mut collections = self.write()?;
        let point = collections
            .get_mut(collection)
            .and_then(|c| c.points.get_mut(id))
            .ok_or_else(|| VectorStoreError::PointNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        point.metadata.extend(patch);
        Ok(())
    }

    fn count(&self, collection: &str, filter: &Filter) -> RbResult<usize> {
        check_filter(filter, self.range_filters)?;
        let collections = self.read()?;
        Ok(collections.get(collection).map_or(0, |c| {
            c.points.values().filter(|p| filter.matches(&p.metadata)).count()
        }))
    }

    fn list_collections(&self) -> RbResult<Vec<String>> {
        Ok(self.read()?.keys().cloned().collect())
    }

    fn collection_info(&self, collection: &str) -> RbResult<Option<CollectionInfo>> {
        Ok(self.read()?.get(collection).map(|c| CollectionInfo {
            name: collection.to_string(),
            points_count: c.points.len(),
            dimensions: c.dimensions,
        }))
    }

    fn isolation_mode(&self) -> IsolationMode {
        self.isolation
    }

    fn supports_range_filters(&self) -> bool {
        self.range_filters
    }
}
