//! Per-project Beta reliability parameters for each signal channel.
//!
//! Each channel carries a `Beta(alpha, beta)` over "this channel's polarity
//! predicts real helpfulness". The uniform prior `Beta(1, 1)` gives every
//! channel a reliability of 0.5 until the project has ground truth to learn from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::signal::{Signal, SignalType};

/// Beta distribution parameters. Both are kept at or above 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaParams {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaParams {
    /// Lower bound for both parameters (the uniform prior).
    pub const FLOOR: f64 = 1.0;

    /// Create params, flooring each value at 1 (NaN becomes 1).
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self {
            alpha: floor(alpha),
            beta: floor(beta),
        }
    }

    /// Posterior mean: how reliable this channel has proven to be.
    pub fn reliability(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }
}

impl Default for BetaParams {
    fn default() -> Self {
        Self {
            alpha: Self::FLOOR,
            beta: Self::FLOOR,
        }
    }
}

fn floor(v: f64) -> f64 {
    if v.is_nan() {
        BetaParams::FLOOR
    } else {
        v.max(BetaParams::FLOOR)
    }
}

/// Outcome of one `learn_from_feedback` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningTally {
    /// Signals whose polarity matched the ground truth.
    pub agreements: usize,
    /// Signals whose polarity contradicted the ground truth.
    pub disagreements: usize,
    /// Signals skipped because they belong to another project.
    pub skipped: usize,
}

impl LearningTally {
    pub fn applied(&self) -> usize {
        self.agreements + self.disagreements
    }
}

/// Learned reliability of each signal channel for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectWeights {
    pub project_id: String,
    pub explicit: BetaParams,
    pub usage: BetaParams,
    pub outcome: BetaParams,
    pub updated_at: DateTime<Utc>,
}

impl ProjectWeights {
    /// The uniform prior for a project with no learned history.
    pub fn uniform(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            explicit: BetaParams::default(),
            usage: BetaParams::default(),
            outcome: BetaParams::default(),
            updated_at: Utc::now(),
        }
    }

    pub fn params(&self, signal_type: SignalType) -> BetaParams {
        match signal_type {
            SignalType::Explicit => self.explicit,
            SignalType::Usage => self.usage,
            SignalType::Outcome => self.outcome,
        }
    }

    fn params_mut(&mut self, signal_type: SignalType) -> &mut BetaParams {
        match signal_type {
            SignalType::Explicit => &mut self.explicit,
            SignalType::Usage => &mut self.usage,
            SignalType::Outcome => &mut self.outcome,
        }
    }

    /// Reliability weight `alpha / (alpha + beta)` for one channel.
    pub fn reliability(&self, signal_type: SignalType) -> f64 {
        self.params(signal_type).reliability()
    }

    /// Calibrate channel reliability against a known outcome.
    ///
    /// Every contributing signal is compared with `outcome_was_helpful`:
    /// agreement bumps its channel's alpha by 1, disagreement bumps its beta
    /// by 1. Signals from other projects are skipped. Mutates in place; the
    /// caller persists the result.
    pub fn learn_from_feedback(
        &mut self,
        outcome_was_helpful: bool,
        contributing_signals: &[Signal],
    ) -> LearningTally {
        let mut tally = LearningTally::default();
        for signal in contributing_signals {
            if signal.project_id != self.project_id {
                tally.skipped += 1;
                continue;
            }
            let params = self.params_mut(signal.signal_type);
            if signal.agrees_with(outcome_was_helpful) {
                params.alpha += 1.0;
                tally.agreements += 1;
            } else {
                params.beta += 1.0;
                tally.disagreements += 1;
            }
        }
        if tally.applied() > 0 {
            self.updated_at = Utc::now();
        }
        tally
    }
}
