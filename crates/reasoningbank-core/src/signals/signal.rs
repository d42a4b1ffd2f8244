use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{RbResult, ReasoningBankError};

/// The three feedback channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    /// A user directly rated the memory helpful or unhelpful.
    Explicit,
    /// The memory was consulted and its usefulness was inferred passively.
    Usage,
    /// The downstream task the memory was used for later succeeded or failed.
    Outcome,
}

impl SignalType {
    pub const ALL: [SignalType; 3] = [SignalType::Explicit, SignalType::Usage, SignalType::Outcome];

    pub fn as_str(self) -> &'static str {
        match self {
            SignalType::Explicit => "explicit",
            SignalType::Usage => "usage",
            SignalType::Outcome => "outcome",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalType {
    type Err = ReasoningBankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "explicit" => Ok(SignalType::Explicit),
            "usage" => Ok(SignalType::Usage),
            "outcome" => Ok(SignalType::Outcome),
            other => Err(ReasoningBankError::InvalidInput {
                field: "signal_type".into(),
                reason: format!("unknown signal type '{other}'"),
            }),
        }
    }
}

/// One feedback event about one memory. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub memory_id: String,
    pub project_id: String,
    pub signal_type: SignalType,
    pub positive: bool,
    /// Optional correlation id for the session that produced the signal.
    pub session_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Signal {
    /// Create a signal stamped with the current time.
    pub fn new(
        memory_id: impl Into<String>,
        project_id: impl Into<String>,
        signal_type: SignalType,
        positive: bool,
    ) -> RbResult<Self> {
        let signal = Self {
            memory_id: memory_id.into(),
            project_id: project_id.into(),
            signal_type,
            positive,
            session_id: None,
            timestamp: Utc::now(),
        };
        if signal.memory_id.trim().is_empty() {
            return Err(ReasoningBankError::EmptyField { field: "memory_id" });
        }
        if signal.project_id.trim().is_empty() {
            return Err(ReasoningBankError::EmptyField { field: "project_id" });
        }
        Ok(signal)
    }

    pub fn with_session(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id.filter(|s| !s.trim().is_empty());
        self
    }

    /// Override the timestamp (backfill and tests).
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Whether this signal's polarity matches a known ground truth.
    pub fn agrees_with(&self, outcome_was_helpful: bool) -> bool {
        self.positive == outcome_was_helpful
    }
}
