//! SQLite-backed vector store.
//!
//! Vectors are little-endian f32 blobs, metadata is a JSON object. Search
//! scans the collection and scores in Rust.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use reasoningbank_core::errors::{RbResult, VectorStoreError};
use reasoningbank_core::traits::{
    CollectionInfo, Filter, IVectorStore, IsolationMode, Metadata, ScoredPoint, VectorPoint,
};
use reasoningbank_storage::pool::WriteConnection;
use tracing::debug;

use crate::similarity::{bytes_to_f32_vec, cosine_similarity, f32_vec_to_bytes, rank};
use crate::{backend_err, check_filter, check_metadata};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS vector_collections (
    name       TEXT PRIMARY KEY,
    dimensions INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS vector_points (
    collection TEXT NOT NULL REFERENCES vector_collections(name),
    id         TEXT NOT NULL,
    vector     BLOB NOT NULL,
    metadata   TEXT NOT NULL,
    PRIMARY KEY (collection, id)
);
";

fn sql_err(e: rusqlite::Error) -> reasoningbank_core::ReasoningBankError {
    backend_err(e.to_string())
}

fn parse_metadata(raw: &str) -> RbResult<Metadata> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(backend_err(format!("stored metadata is not an object: {other}"))),
    }
}

pub struct SqliteVectorStore {
    conn: WriteConnection,
    isolation: IsolationMode,
}

impl SqliteVectorStore {
    pub fn open(path: &Path, isolation: IsolationMode, busy_timeout_ms: u64) -> RbResult<Self> {
        Self::init(WriteConnection::open(path, busy_timeout_ms)?, isolation)
    }

    pub fn open_in_memory(isolation: IsolationMode) -> RbResult<Self> {
        Self::init(WriteConnection::open_in_memory()?, isolation)
    }

    fn init(conn: WriteConnection, isolation: IsolationMode) -> RbResult<Self> {
        conn.with_conn_sync(|c| c.execute_batch(SCHEMA).map_err(sql_err))?;
        Ok(Self { conn, isolation })
    }

    fn dimensions(conn: &Connection, collection: &str) -> RbResult<Option<usize>> {
        conn.query_row(
            "SELECT dimensions FROM vector_collections WHERE name = ?1",
            params![collection],
            |row| row.get::<_, i64>(0),
        )
        .optional()
        .map(|d| d.map(|d| d as usize))
        .map_err(sql_err)
    }

    /// Every point of a collection that passes `filter`.
    fn scan(conn: &Connection, collection: &str, filter: &Filter) -> RbResult<Vec<VectorPoint>> {
        let mut stmt = conn
            .prepare("SELECT id, vector, metadata FROM vector_points WHERE collection = ?1")
            .map_err(sql_err)?;
        let rows = stmt
            .query_map(params![collection], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Vec<u8>>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(sql_err)?;

        let mut points = Vec::new();
        for row in rows {
            let (id, blob, raw) = row.map_err(sql_err)?;
            let metadata = parse_metadata(&raw)?;
            if filter.matches(&metadata) {
                points.push(VectorPoint {
                    id,
                    vector: bytes_to_f32_vec(&blob),
                    metadata,
                });
            }
        }
        Ok(points)
    }

    /// Create the collection on first insert, then write the point.
    fn upsert_inner(conn: &Connection, collection: &str, point: &VectorPoint) -> RbResult<()> {
        let dims = point.vector.len();
        match Self::dimensions(conn, collection)? {
            Some(expected) if expected != dims => {
                return Err(VectorStoreError::DimensionMismatch {
                    collection: collection.to_string(),
                    expected,
                    actual: dims,
                }
                .into());
            }
            Some(_) => {}
            None => {
                conn.execute(
                    "INSERT INTO vector_collections (name, dimensions) VALUES (?1, ?2)",
                    params![collection, dims as i64],
                )
                .map_err(sql_err)?;
            }
        }
        let metadata = serde_json::to_string(&point.metadata)?;
        conn.execute(
            "INSERT INTO vector_points (collection, id, vector, metadata)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(collection, id) DO UPDATE SET
                vector = excluded.vector,
                metadata = excluded.metadata",
            params![collection, point.id, f32_vec_to_bytes(&point.vector), metadata],
        )
        .map_err(sql_err)?;
        Ok(())
    }
}

impl IVectorStore for SqliteVectorStore {
    fn upsert(&self, collection: &str, point: VectorPoint) -> RbResult<()> {
        check_metadata(&point.metadata)?;
        self.conn.with_conn_sync(|conn| {
            let tx = conn.unchecked_transaction().map_err(sql_err)?;
            match Self::upsert_inner(&tx, collection, &point) {
                Ok(()) => {
                    tx.commit().map_err(sql_err)?;
                    debug!(collection, id = %point.id, "upsert point");
                    Ok(())
                }
                Err(e) => {
                    let _ = tx.rollback();
                    Err(e)
                }
            }
        })
    }

    fn search(
        &self,
        collection: &str,
        query: &[f32],
        limit: usize,
        filter: &Filter,
    ) -> RbResult<Vec<ScoredPoint>> {
        check_filter(filter, true)?;
        self.conn.with_conn_sync(|conn| {
            let Some(expected) = Self::dimensions(conn, collection)? else {
                return Ok(Vec::new());
            };
            if limit == 0 {
                return Ok(Vec::new());
            }
            if expected != query.len() {
                return Err(VectorStoreError::DimensionMismatch {
                    collection: collection.to_string(),
                    expected,
                    actual: query.len(),
                }
                .into());
            }
            let hits = Self::scan(conn, collection, filter)?
                .into_iter()
                .map(|p| ScoredPoint {
                    score: cosine_similarity(query, &p.vector),
                    id: p.id,
                    metadata: p.metadata,
                })
                .collect();
            Ok(rank(hits, limit))
        })
    }

    fn get(&self, collection: &str, id: &str) -> RbResult<Option<VectorPoint>> {
        self.conn.with_conn_sync(|conn| {
            let row = conn
                .query_row(
                    "SELECT vector, metadata FROM vector_points WHERE collection = ?1 AND id = ?2",
                    params![collection, id],
                    |row| Ok((row.get::<_, Vec<u8>>(0)?, row.get::<_, String>(1)?)),
                )
                .optional()
                .map_err(sql_err)?;
            row.map(|(blob, raw)| {
                Ok(VectorPoint {
                    id: id.to_string(),
                    vector: bytes_to_f32_vec(&blob),
                    metadata: parse_metadata(&raw)?,
                })
            })
            .transpose()
        })
    }

    fn set_metadata(&self, collection: &str, id: &str, patch: Metadata) -> RbResult<()> {
        check_metadata(&patch)?;
        self.conn.with_conn_sync(|conn| {
            let raw: Option<String> = conn
                .query_row(
                    "SELECT metadata FROM vector_points WHERE collection = ?1 AND id = ?2",
                    params![collection, id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(sql_err)?;
            let Some(raw) = raw else {
                return Err(VectorStoreError::PointNotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                }
                .into());
            };
            let mut metadata = parse_metadata(&raw)?;
            metadata.extend(patch);
            conn.execute(
                "UPDATE vector_points SET metadata = ?3 WHERE collection = ?1 AND id = ?2",
                params![collection, id, serde_json::to_string(&metadata)?],
            )
            .map_err(sql_err)?;
            Ok(())
        })
    }

    fn count(&self, collection: &str, filter: &Filter) -> RbResult<usize> {
        self.conn.with_conn_sync(|conn| {
            if filter.is_empty() {
                let n: i64 = conn
                    .query_row(
                        "SELECT COUNT(*) FROM vector_points WHERE collection = ?1",
                        params![collection],
                        |row| row.get(0),
                    )
                    .map_err(sql_err)?;
                return Ok(n as usize);
            }
            Ok(Self::scan(conn, collection, filter)?.len())
        })
    }

    fn list_collections(&self) -> RbResult<Vec<String>> {
        self.conn.with_conn_sync(|conn| {
            let mut stmt = conn
                .prepare("SELECT name FROM vector_collections ORDER BY name")
                .map_err(sql_err)?;
            let names = stmt
                .query_map([], |row| row.get::<_, String>(0))
                .map_err(sql_err)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(sql_err)?;
            Ok(names)
        })
    }

    fn collection_info(&self, collection: &str) -> RbResult<Option<CollectionInfo>> {
        self.conn.with_conn_sync(|conn| {
            let Some(dimensions) = Self::dimensions(conn, collection)? else {
                return Ok(None);
            };
            let n: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM vector_points WHERE collection = ?1",
                    params![collection],
                    |row| row.get(0),
                )
                .map_err(sql_err)?;
            Ok(Some(CollectionInfo {
                name: collection.to_string(),
                points_count: n as usize,
                dimensions: Some(dimensions),
            }))
        })
    }

    fn isolation_mode(&self) -> IsolationMode {
        self.isolation
    }

    fn supports_range_filters(&self) -> bool {
        true
    }
}
