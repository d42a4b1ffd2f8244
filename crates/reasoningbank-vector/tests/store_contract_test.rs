//! Behavior both stores share, run against each backend.

use serde_json::{json, Value};

use reasoningbank_core::errors::{ReasoningBankError, VectorStoreError};
use reasoningbank_core::traits::{Condition, Filter, IVectorStore, IsolationMode, Metadata, VectorPoint};
use reasoningbank_vector::{InMemoryVectorStore, SqliteVectorStore};

fn md(v: Value) -> Metadata {
    v.as_object().cloned().unwrap()
}

fn point(id: &str, vector: Vec<f32>, confidence: f64, project: &str) -> VectorPoint {
    VectorPoint {
        id: id.into(),
        vector,
        metadata: md(json!({"confidence": confidence, "project_id": project})),
    }
}

fn stores() -> Vec<(&'static str, Box<dyn IVectorStore>)> {
    vec![
        ("memory", Box::new(InMemoryVectorStore::new())),
        (
            "sqlite",
            Box::new(SqliteVectorStore::open_in_memory(IsolationMode::PerTenantCollection).unwrap()),
        ),
    ]
}

#[test]
fn missing_collection_is_empty_not_error() {
    for (name, store) in stores() {
        assert!(store.search("nope", &[1.0, 0.0], 5, &Filter::new()).unwrap().is_empty(), "{name}");
        assert_eq!(store.count("nope", &Filter::new()).unwrap(), 0, "{name}");
        assert!(store.get("nope", "x").unwrap().is_none(), "{name}");
        assert!(store.collection_info("nope").unwrap().is_none(), "{name}");
    }
}

#[test]
fn search_orders_by_similarity_and_respects_limit() {
    for (name, store) in stores() {
        store.upsert("c", point("near", vec![1.0, 0.1], 0.9, "p")).unwrap();
        store.upsert("c", point("far", vec![0.0, 1.0], 0.9, "p")).unwrap();
        store.upsert("c", point("opposite", vec![-1.0, 0.0], 0.9, "p")).unwrap();

        let hits = store.search("c", &[1.0, 0.0], 10, &Filter::new()).unwrap();
        let ids: Vec<_> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["near", "far", "opposite"], "{name}");

        assert_eq!(store.search("c", &[1.0, 0.0], 2, &Filter::new()).unwrap().len(), 2, "{name}");
        assert!(store.search("c", &[1.0, 0.0], 0, &Filter::new()).unwrap().is_empty(), "{name}");
    }
}

#[test]
fn range_filter_gates_on_confidence() {
    for (name, store) in stores() {
        store.upsert("c", point("high", vec![1.0, 0.0], 0.8, "p")).unwrap();
        store.upsert("c", point("edge", vec![1.0, 0.0], 0.7, "p")).unwrap();
        store.upsert("c", point("low", vec![1.0, 0.0], 0.4, "p")).unwrap();
        let filter = Filter::new().must(Condition::at_least("confidence", 0.7));

        let hits = store.search("c", &[1.0, 0.0], 10, &filter).unwrap();
        assert_eq!(hits.len(), 2, "{name}");
        assert!(hits.iter().all(|h| h.metadata["confidence"].as_f64().unwrap() >= 0.7));
        assert_eq!(store.count("c", &filter).unwrap(), 2, "{name}");
        assert_eq!(store.count("c", &Filter::new()).unwrap(), 3, "{name}");
    }
}

#[test]
fn upsert_replaces_existing_point() {
    for (name, store) in stores() {
        store.upsert("c", point("a", vec![1.0, 0.0], 0.5, "p")).unwrap();
        store.upsert("c", point("a", vec![0.0, 1.0], 0.9, "p")).unwrap();
        let got = store.get("c", "a").unwrap().unwrap();
        assert_eq!(got.vector, vec![0.0, 1.0], "{name}");
        assert_eq!(store.collection_info("c").unwrap().unwrap().points_count, 1, "{name}");
    }
}

#[test]
fn dimension_mismatch_is_rejected() {
    for (name, store) in stores() {
        store.upsert("c", point("a", vec![1.0, 0.0], 0.5, "p")).unwrap();
        let err = store.upsert("c", point("b", vec![1.0, 0.0, 0.0], 0.5, "p")).unwrap_err();
        assert!(
            matches!(err, ReasoningBankError::VectorStoreError(VectorStoreError::DimensionMismatch { .. })),
            "{name}"
        );
        assert!(store.search("c", &[1.0], 5, &Filter::new()).is_err(), "{name}");
    }
}

#[test]
fn set_metadata_merges_and_requires_point() {
    for (name, store) in stores() {
        store.upsert("c", point("a", vec![1.0, 0.0], 0.5, "p")).unwrap();
        store.set_metadata("c", "a", md(json!({"confidence": 0.84}))).unwrap();
        let got = store.get("c", "a").unwrap().unwrap();
        assert_eq!(got.metadata["confidence"], json!(0.84), "{name}");
        assert_eq!(got.metadata["project_id"], json!("p"), "{name}");

        let err = store.set_metadata("c", "missing", Metadata::new()).unwrap_err();
        assert!(
            matches!(err, ReasoningBankError::VectorStoreError(VectorStoreError::PointNotFound { .. })),
            "{name}"
        );
    }
}

#[test]
fn non_numeric_confidence_is_invalid_metadata() {
    for (name, store) in stores() {
        let bad = VectorPoint {
            id: "a".into(),
            vector: vec![1.0],
            metadata: md(json!({"confidence": "high"})),
        };
        let err = store.upsert("c", bad).unwrap_err();
        assert!(
            matches!(err, ReasoningBankError::VectorStoreError(VectorStoreError::InvalidMetadata { .. })),
            "{name}"
        );
    }
}

#[test]
fn collections_are_listed() {
    for (name, store) in stores() {
        store.upsert("b", point("1", vec![1.0], 0.5, "p")).unwrap();
        store.upsert("a", point("1", vec![1.0], 0.5, "p")).unwrap();
        assert_eq!(store.list_collections().unwrap(), ["a", "b"], "{name}");
    }
}

#[test]
fn store_without_range_support_rejects_range_filters() {
    let store = InMemoryVectorStore::with_options(IsolationMode::PerTenantCollection, false);
    assert!(!store.supports_range_filters());
    store.upsert("c", point("a", vec![1.0], 0.9, "p")).unwrap();
    let filter = Filter::new().must(Condition::at_least("confidence", 0.7));
    let err = store.search("c", &[1.0], 5, &filter).unwrap_err();
    assert!(matches!(
        err,
        ReasoningBankError::VectorStoreError(VectorStoreError::UnsupportedFilter { .. })
    ));
    let eq = Filter::new().must(Condition::equals("project_id", "p"));
    assert_eq!(store.search("c", &[1.0], 5, &eq).unwrap().len(), 1);
}

#[test]
fn shared_collection_isolates_by_tenant_filter() {
    let store = InMemoryVectorStore::with_options(IsolationMode::Shared, true);
    let mode = store.isolation_mode();
    let coll_a = mode.collection_for("rb", "proj-a");
    let coll_b = mode.collection_for("rb", "proj-b");
    assert_eq!(coll_a, coll_b);

    store.upsert(&coll_a, point("a1", vec![1.0, 0.0], 0.9, "proj-a")).unwrap();
    store.upsert(&coll_b, point("b1", vec![1.0, 0.0], 0.9, "proj-b")).unwrap();

    let filter_a = Filter::new().must(mode.tenant_filter("proj-a").unwrap());
    let hits = store.search(&coll_a, &[1.0, 0.0], 10, &filter_a).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "a1");
}

#[test]
fn sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vectors.db");
    {
        let store = SqliteVectorStore::open(&path, IsolationMode::PerTenantCollection, 5000).unwrap();
        store.upsert("c", point("a", vec![0.6, 0.8], 0.75, "p")).unwrap();
    }
    let store = SqliteVectorStore::open(&path, IsolationMode::PerTenantCollection, 5000).unwrap();
    let got = store.get("c", "a").unwrap().unwrap();
    assert_eq!(got.vector, vec![0.6, 0.8]);
    assert_eq!(got.metadata["confidence"], json!(0.75));
}
