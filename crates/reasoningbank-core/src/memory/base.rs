use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::confidence::Confidence;
use crate::errors::{RbResult, ReasoningBankError};

/// Outcome of the action a memory describes. This is not feedback on the
/// memory itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
}

/// How a memory entered the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryOrigin {
    /// Authored directly by a user. Gets the explicit-record confidence.
    #[default]
    Explicit,
    /// Distilled from a session or derived by a job. Keeps the caller's confidence.
    Derived,
}

/// A unit of recorded knowledge, scoped to one project.
///
/// `id` and `project_id` are private so they cannot change after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    id: String,
    project_id: String,
    pub title: String,
    /// Free text. Scrubbed for secrets before persistence.
    pub content: String,
    /// Provenance note, e.g. "learned from session X". Empty by default.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub outcome: Outcome,
    #[serde(default)]
    pub origin: MemoryOrigin,
    /// Current confidence. This is what search gates on and reports.
    pub confidence: Confidence,
    /// Write-time confidence, fixed when the memory is recorded.
    pub declared_confidence: Confidence,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Memory {
    /// Create an explicitly authored memory with the uniform default confidence.
    pub fn new<I, S>(
        project_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        outcome: Outcome,
        tags: I,
    ) -> RbResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let now = Utc::now();
        let memory = Self {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: project_id.into(),
            title: title.into(),
            content: content.into(),
            description: String::new(),
            tags: normalize_tags(tags),
            outcome,
            origin: MemoryOrigin::Explicit,
            confidence: Confidence::default(),
            declared_confidence: Confidence::default(),
            created_at: now,
            updated_at: now,
        };
        memory.validate()?;
        Ok(memory)
    }

    /// Create a derived memory that keeps the caller-supplied confidence at record time.
    pub fn derived<I, S>(
        project_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        outcome: Outcome,
        tags: I,
        confidence: f64,
    ) -> RbResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut memory = Self::new(project_id, title, content, outcome, tags)?;
        memory.origin = MemoryOrigin::Derived;
        memory.confidence = Confidence::new(confidence);
        memory.declared_confidence = memory.confidence;
        Ok(memory)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare a confidence for this memory. `record` keeps a declared value
    /// instead of assigning the explicit-record default.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.origin = MemoryOrigin::Derived;
        self.confidence = Confidence::new(confidence);
        self.declared_confidence = self.confidence;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Check the required fields. Called by the constructors and again by `record`,
    /// since the content fields are public.
    pub fn validate(&self) -> RbResult<()> {
        if self.id.trim().is_empty() {
            return Err(ReasoningBankError::EmptyField { field: "id" });
        }
        if self.project_id.trim().is_empty() {
            return Err(ReasoningBankError::EmptyField { field: "project_id" });
        }
        if self.title.trim().is_empty() {
            return Err(ReasoningBankError::EmptyField { field: "title" });
        }
        if self.content.trim().is_empty() {
            return Err(ReasoningBankError::EmptyField { field: "content" });
        }
        Ok(())
    }

    /// Replace the current confidence and bump `updated_at`.
    pub fn set_confidence(&mut self, confidence: Confidence) {
        self.confidence = confidence;
        self.updated_at = Utc::now();
    }

    /// Freeze the current confidence as the declared (write-time) value.
    pub fn declare_confidence(&mut self, confidence: Confidence) {
        self.confidence = confidence;
        self.declared_confidence = confidence;
    }

    /// Text handed to the embedder for this memory.
    pub fn embedding_text(&self) -> String {
        format!("{}\n{}", self.title, self.content)
    }
}

/// Identity equality: two memories are equal if they have the same ID.
impl PartialEq for Memory {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

fn normalize_tags<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    tags.into_iter()
        .map(|t| t.into().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assigns_defaults() {
        let m = Memory::new("proj", "nil fix", "check user != nil", Outcome::Success, ["go"]).unwrap();
        assert!(!m.id().is_empty());
        assert_eq!(m.project_id(), "proj");
        assert_eq!(m.confidence.value(), 0.5);
        assert_eq!(m.declared_confidence.value(), 0.5);
        assert_eq!(m.description, "");
        assert_eq!(m.origin, MemoryOrigin::Explicit);
    }

    #[test]
    fn with_confidence_marks_memory_derived() {
        let m = Memory::new("p", "t", "c", Outcome::Success, ["go"])
            .unwrap()
            .with_confidence(0.6);
        assert_eq!(m.origin, MemoryOrigin::Derived);
        assert_eq!(m.confidence.value(), 0.6);
        assert_eq!(m.declared_confidence.value(), 0.6);
    }

    #[test]
    fn new_rejects_empty_required_fields() {
        let no_project = Memory::new("", "t", "c", Outcome::Success, Vec::<String>::new());
        assert!(matches!(
            no_project,
            Err(ReasoningBankError::EmptyField { field: "project_id" })
        ));

        let no_title = Memory::new("p", "  ", "c", Outcome::Success, Vec::<String>::new());
        assert!(matches!(no_title, Err(ReasoningBankError::EmptyField { field: "title" })));

        let no_content = Memory::new("p", "t", "", Outcome::Failure, Vec::<String>::new());
        assert!(matches!(no_content, Err(ReasoningBankError::EmptyField { field: "content" })));
    }

    #[test]
    fn ids_are_unique() {
        let a = Memory::new("p", "t", "c", Outcome::Success, Vec::<String>::new()).unwrap();
        let b = Memory::new("p", "t", "c", Outcome::Success, Vec::<String>::new()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn tags_are_deduplicated_and_trimmed() {
        let m = Memory::new("p", "t", "c", Outcome::Success, ["rust", " rust ", "", "go"]).unwrap();
        let tags: Vec<_> = m.tags.iter().cloned().collect();
        assert_eq!(tags, vec!["go".to_string(), "rust".to_string()]);
    }

    #[test]
    fn derived_keeps_supplied_confidence() {
        let m = Memory::derived("p", "t", "c", Outcome::Success, Vec::<String>::new(), 0.6).unwrap();
        assert_eq!(m.origin, MemoryOrigin::Derived);
        assert_eq!(m.confidence.value(), 0.6);
        assert_eq!(m.declared_confidence.value(), 0.6);
    }

    #[test]
    fn serde_roundtrip_preserves_identity() {
        let m = Memory::new("p", "t", "c", Outcome::Failure, ["a"])
            .unwrap()
            .with_description("learned from session 42");
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["project_id"], "p");
        assert_eq!(json["confidence"], 0.5);
        let back: Memory = serde_json::from_value(json).unwrap();
        assert_eq!(back.id(), m.id());
        assert_eq!(back.description, "learned from session 42");
    }
}
