//! Tuning run results.

use serde::Serialize;

use crate::domain::{Algorithm, WeightVector};

/// Result of a tuning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TuningOutcome {
    pub algorithm: Algorithm,
    pub best_weights: WeightVector,
    pub best_objective: f64,
    pub baseline_objective: f64,
    /// `(baseline - best) / baseline * 100`; zero for a zero baseline.
    pub percent_improvement: f64,
    /// Weight vectors evaluated, excluding the baseline.
    pub iterations: usize,
    /// Annealing: accepted moves. Random search: strict improvements.
    pub accepted_moves: usize,
    /// True when the deadline cut the search short.
    pub stopped_early: bool,
}

#[must_use]
pub fn percent_improvement(baseline: f64, best: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    (baseline - best) / baseline * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_improvement() {
        assert_eq!(percent_improvement(200.0, 150.0), 25.0);
        assert_eq!(percent_improvement(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let outcome = TuningOutcome {
            algorithm: Algorithm::Annealing,
            best_weights: WeightVector::default(),
            best_objective: 1.0,
            baseline_objective: 2.0,
            percent_improvement: 50.0,
            iterations: 10,
            accepted_moves: 4,
            stopped_early: false,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["algorithm"], "annealing");
        assert_eq!(json["percentImprovement"], 50.0);
        assert_eq!(json["bestWeights"]["competitiveness"], 0.1);
    }
}
