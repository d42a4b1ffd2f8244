use serde::{Deserialize, Serialize};

/// Starting pseudo-counts for the posterior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaPrior {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaPrior {
    /// Smallest total weight a declared prior may carry.
    pub const MIN_STRENGTH: f64 = 1e-6;

    /// `Beta(1, 1)`: no opinion, mean 0.5.
    pub const fn uniform() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }

    /// Spread a declared confidence `c` over `strength` pseudo-observations:
    /// `alpha = c * strength`, `beta = (1 - c) * strength`.
    ///
    /// `from_declared(0.5, 2.0)` is the uniform prior.
    pub fn from_declared(confidence: f64, strength: f64) -> Self {
        let c = if confidence.is_nan() {
            0.5
        } else {
            confidence.clamp(0.0, 1.0)
        };
        let s = if strength.is_nan() {
            Self::MIN_STRENGTH
        } else {
            strength.max(Self::MIN_STRENGTH)
        };
        Self {
            alpha: c * s,
            beta: (1.0 - c) * s,
        }
    }

    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }
}

impl Default for BetaPrior {
    fn default() -> Self {
        Self::uniform()
    }
}
