use serde::{Deserialize, Serialize};

use super::signal::{Signal, SignalType};

/// Lifetime signal counters for one memory, one per (type, polarity) pair.
///
/// Counters only ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalAggregate {
    pub explicit_pos: u64,
    pub explicit_neg: u64,
    pub usage_pos: u64,
    pub usage_neg: u64,
    pub outcome_pos: u64,
    pub outcome_neg: u64,
}

impl SignalAggregate {
    /// Build an aggregate by counting a slice of signals.
    pub fn from_signals(signals: &[Signal]) -> Self {
        let mut agg = Self::default();
        for s in signals {
            agg.record(s.signal_type, s.positive);
        }
        agg
    }

    /// `(positive, negative)` counts for one signal type.
    pub fn counts(&self, signal_type: SignalType) -> (u64, u64) {
        match signal_type {
            SignalType::Explicit => (self.explicit_pos, self.explicit_neg),
            SignalType::Usage => (self.usage_pos, self.usage_neg),
            SignalType::Outcome => (self.outcome_pos, self.outcome_neg),
        }
    }

    /// Count one more signal.
    pub fn record(&mut self, signal_type: SignalType, positive: bool) {
        let slot = match (signal_type, positive) {
            (SignalType::Explicit, true) => &mut self.explicit_pos,
            (SignalType::Explicit, false) => &mut self.explicit_neg,
            (SignalType::Usage, true) => &mut self.usage_pos,
            (SignalType::Usage, false) => &mut self.usage_neg,
            (SignalType::Outcome, true) => &mut self.outcome_pos,
            (SignalType::Outcome, false) => &mut self.outcome_neg,
        };
        *slot = slot.saturating_add(1);
    }

    /// Total number of signals counted.
    pub fn total(&self) -> u64 {
        SignalType::ALL
            .iter()
            .map(|t| {
                let (p, n) = self.counts(*t);
                p + n
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
