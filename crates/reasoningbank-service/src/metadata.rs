//! Memory <-> vector point metadata.

use chrono::{DateTime, Utc};
use serde_json::Value;

use reasoningbank_core::constants::CONFIDENCE_KEY;
use reasoningbank_core::errors::{RbResult, VectorStoreError};
use reasoningbank_core::memory::{Confidence, Memory};
use reasoningbank_core::traits::Metadata;

pub(crate) fn to_metadata(memory: &Memory) -> RbResult<Metadata> {
    match serde_json::to_value(memory)? {
        Value::Object(map) => Ok(map),
        other => Err(VectorStoreError::InvalidMetadata {
            key: "memory".into(),
            reason: format!("memory serialized to non-object {other}"),
        }
        .into()),
    }
}

pub(crate) fn from_metadata(metadata: Metadata) -> RbResult<Memory> {
    Ok(serde_json::from_value(Value::Object(metadata))?)
}

/// Patch written after a confidence recompute.
pub(crate) fn confidence_patch(confidence: Confidence, updated_at: DateTime<Utc>) -> Metadata {
    let mut patch = Metadata::new();
    patch.insert(CONFIDENCE_KEY.into(), Value::from(confidence.value()));
    patch.insert("updated_at".into(), Value::String(updated_at.to_rfc3339()));
    patch
}

#[cfg(test)]
mod tests {
    use super::*;
    use reasoningbank_core::memory::Outcome;

    #[test]
    fn metadata_carries_filterable_fields() {
        let m = Memory::new("proj", "t", "c", Outcome::Success, ["go"]).unwrap();
        let md = to_metadata(&m).unwrap();
        for key in [
            "project_id",
            "title",
            "content",
            "description",
            "tags",
            "outcome",
            "origin",
            "confidence",
            "declared_confidence",
            "created_at",
            "updated_at",
        ] {
            assert!(md.contains_key(key), "missing {key}");
        }
        assert!(md["confidence"].is_number());
        assert_eq!(from_metadata(md).unwrap().id(), m.id());
    }

    #[test]
    fn patch_updates_confidence_in_place() {
        let m = Memory::new("proj", "t", "c", Outcome::Success, Vec::<String>::new()).unwrap();
        let mut md = to_metadata(&m).unwrap();
        md.extend(confidence_patch(Confidence::new(0.64), Utc::now()));
        let back = from_metadata(md).unwrap();
        assert_eq!(back.confidence.value(), 0.64);
        assert_eq!(back.declared_confidence.value(), 0.5);
    }
}
