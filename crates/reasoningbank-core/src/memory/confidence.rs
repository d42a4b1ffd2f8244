use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants;

/// Confidence score clamped to [0.0, 1.0].
/// Represents how much a memory should be trusted when it is retrieved.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// Uniform default, no evidence either way.
    pub const DEFAULT: f64 = constants::DEFAULT_CONFIDENCE;

    /// Create a new Confidence, clamping to [0.0, 1.0]. NaN maps to the default.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::DEFAULT);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(Confidence::new(1.7).value(), 1.0);
        assert_eq!(Confidence::new(-0.2).value(), 0.0);
        assert_eq!(Confidence::new(0.42).value(), 0.42);
    }

    #[test]
    fn nan_falls_back_to_default() {
        assert_eq!(Confidence::new(f64::NAN).value(), Confidence::DEFAULT);
    }

    #[test]
    fn deserialization_clamps() {
        let c: Confidence = serde_json::from_str("3.5").unwrap();
        assert_eq!(c.value(), 1.0);
        assert_eq!(serde_json::to_string(&Confidence::new(0.25)).unwrap(), "0.25");
    }
}
