//! The five-dimension weight vector applied by the scorer.
//!
//! Weights are signed and unnormalized at scoring time; the tuners keep
//! them on the probability simplex (non-negative, summing to one).

use serde::{Deserialize, Serialize};

/// Number of scoring dimensions.
pub const DIMENSIONS: usize = 5;

/// Weights for combining the five score dimensions into a total.
///
/// Deserialization requires every field and rejects unknown ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightVector {
    /// Weight on closeness of the margin to the target margin.
    pub profit_target_proximity: f64,
    /// Weight on how far below the public price the buy price sits.
    pub competitiveness: f64,
    /// Weight on the position of the spread within its window.
    pub spread_utility: f64,
    /// Weight on margin headroom relative to settlement volatility.
    pub volatility_safety: f64,
    /// Weight on settlement price staying near its moving average.
    pub ma_reversion_safety: f64,
}

impl WeightVector {
    #[must_use]
    pub const fn new(
        profit_target_proximity: f64,
        competitiveness: f64,
        spread_utility: f64,
        volatility_safety: f64,
        ma_reversion_safety: f64,
    ) -> Self {
        Self {
            profit_target_proximity,
            competitiveness,
            spread_utility,
            volatility_safety,
            ma_reversion_safety,
        }
    }

    /// Weights in dimension order.
    #[must_use]
    pub const fn as_array(&self) -> [f64; DIMENSIONS] {
        [
            self.profit_target_proximity,
            self.competitiveness,
            self.spread_utility,
            self.volatility_safety,
            self.ma_reversion_safety,
        ]
    }

    #[must_use]
    pub const fn from_array(values: [f64; DIMENSIONS]) -> Self {
        Self::new(values[0], values[1], values[2], values[3], values[4])
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Rescale so the weights sum to one.
    ///
    /// Returns `None` when the sum is zero or not finite.
    #[must_use]
    pub fn normalized(&self) -> Option<Self> {
        let sum = self.sum();
        if sum == 0.0 || !sum.is_finite() {
            return None;
        }
        Some(Self::from_array(self.as_array().map(|w| w / sum)))
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|w| w.is_finite())
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::new(0.5, 0.1, 0.1, 0.1, 0.1)
    }
}
