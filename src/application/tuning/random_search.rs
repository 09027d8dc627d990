//! Uniform random search over the weight simplex.
//!
//! Draws are taken from the injected RNG one batch at a time, in order.
//! Each batch is evaluated in parallel on scoped threads, then folded into
//! the running best in draw order, so the outcome only depends on the seed
//! and never on the worker count.

use std::thread;
use std::time::Instant;

use rand::Rng;

use super::budget::{expired, TuningBudget};
use super::outcome::{percent_improvement, TuningOutcome};
use super::Objective;
use crate::domain::{Algorithm, WeightVector, DIMENSIONS};
use crate::error::{ConfigError, Result};
use crate::port::{TuningEvent, TuningObserver};

/// Draw a weight vector uniformly from `[0, 1)` per dimension, normalized
/// to sum to one.
pub fn random_weights<R: Rng + ?Sized>(rng: &mut R) -> WeightVector {
    let raw: [f64; DIMENSIONS] = std::array::from_fn(|_| rng.gen::<f64>());
    WeightVector::from_array(raw)
        .normalized()
        .unwrap_or_else(|| WeightVector::from_array([1.0 / DIMENSIONS as f64; DIMENSIONS]))
}

/// Configuration for random search.
#[derive(Debug, Clone)]
pub struct RandomSearchConfig {
    /// Parallel evaluations per batch.
    pub workers: usize,
    /// Emit a progress event every this many iterations.
    pub progress_interval: usize,
}

impl Default for RandomSearchConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            progress_interval: 20,
        }
    }
}

/// Random search tuner.
#[derive(Debug, Clone, Default)]
pub struct RandomSearch {
    config: RandomSearchConfig,
}

impl RandomSearch {
    #[must_use]
    pub const fn new(config: RandomSearchConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &RandomSearchConfig {
        &self.config
    }

    /// Search for weights that beat the base configuration's weights.
    ///
    /// The best starts at the baseline and is replaced only on strict
    /// improvement, so the outcome is never worse than the baseline.
    ///
    /// # Errors
    ///
    /// Returns a config error for a zero progress interval.
    pub fn run<R: Rng + ?Sized>(
        &self,
        objective: &Objective,
        budget: TuningBudget,
        rng: &mut R,
        observer: &dyn TuningObserver,
    ) -> Result<TuningOutcome> {
        if self.config.progress_interval == 0 {
            return Err(ConfigError::invalid("progress_interval", "must be positive").into());
        }

        let started = Instant::now();
        let expires_at = budget.expires_at(started);
        let workers = self.config.workers.max(1);

        let baseline_weights = objective.base_weights();
        let baseline = objective.evaluate(&baseline_weights);
        observer.observe(TuningEvent::Started {
            algorithm: Algorithm::Random,
            iterations: budget.iterations,
            baseline_objective: baseline,
        });

        let mut best_weights = baseline_weights;
        let mut best = baseline;
        let mut completed = 0;
        let mut improvements = 0;
        let mut stopped_early = false;

        while completed < budget.iterations {
            if expired(expires_at) {
                stopped_early = true;
                break;
            }

            let size = workers.min(budget.iterations - completed);
            let batch: Vec<WeightVector> = (0..size).map(|_| random_weights(rng)).collect();
            let scores = evaluate_batch(objective, &batch);

            for (weights, score) in batch.into_iter().zip(scores) {
                if score < best {
                    best = score;
                    best_weights = weights;
                    improvements += 1;
                    observer.observe(TuningEvent::Improved {
                        iteration: completed,
                        objective: score,
                        weights,
                    });
                }
                completed += 1;

                if completed % self.config.progress_interval == 0 {
                    observer.observe(TuningEvent::Progress {
                        iteration: completed,
                        total: budget.iterations,
                        best_objective: best,
                        current_objective: score,
                        temperature: None,
                    });
                }
            }
        }

        observer.observe(TuningEvent::Finished {
            iterations: completed,
            best_objective: best,
            stopped_early,
        });

        Ok(TuningOutcome {
            algorithm: Algorithm::Random,
            best_weights,
            best_objective: best,
            baseline_objective: baseline,
            percent_improvement: percent_improvement(baseline, best),
            iterations: completed,
            accepted_moves: improvements,
            stopped_early,
        })
    }
}

/// Evaluate a batch on scoped threads, one per vector. Results keep batch order.
///
/// A worker that panics costs the no-solution penalty, as a failing
/// scenario does.
fn evaluate_batch(objective: &Objective, batch: &[WeightVector]) -> Vec<f64> {
    if batch.len() <= 1 {
        return batch.iter().map(|w| objective.evaluate(w)).collect();
    }
    thread::scope(|scope| {
        let handles: Vec<_> = batch
            .iter()
            .map(|weights| scope.spawn(move || objective.evaluate(weights)))
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or(objective.targets().no_solution_penalty)
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pricing::PricingConfig;
    use crate::application::tuning::{ObjectiveTargets, Scenario};
    use crate::port::NullObserver;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn objective() -> Objective {
        let config = PricingConfig {
            margin_min: dec!(0),
            ..PricingConfig::default()
        };
        Objective::new(
            config,
            vec![
                Scenario::new(dec!(11_000_000), dec!(17_500_000)),
                Scenario::new(dec!(11_200_000), dec!(17_800_000)),
            ],
            ObjectiveTargets::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_random_weights_on_simplex() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let w = random_weights(&mut rng);
            assert!((w.sum() - 1.0).abs() < 1e-9);
            assert!(w.as_array().iter().all(|v| *v >= 0.0));
        }
    }

    #[test]
    fn test_random_weights_reproducible() {
        let a = random_weights(&mut StdRng::seed_from_u64(42));
        let b = random_weights(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_never_worse_than_baseline() {
        let outcome = RandomSearch::default()
            .run(
                &objective(),
                TuningBudget::iterations(30),
                &mut StdRng::seed_from_u64(1),
                &NullObserver,
            )
            .unwrap();
        assert!(outcome.best_objective <= outcome.baseline_objective);
        assert_eq!(outcome.iterations, 30);
        assert!(!outcome.stopped_early);
    }

    #[test]
    fn test_worker_count_does_not_change_outcome() {
        let objective = objective();
        let run = |workers| {
            RandomSearch::new(RandomSearchConfig {
                workers,
                progress_interval: 20,
            })
            .run(
                &objective,
                TuningBudget::iterations(25),
                &mut StdRng::seed_from_u64(99),
                &NullObserver,
            )
            .unwrap()
        };
        let single = run(1);
        let parallel = run(4);
        assert_eq!(single.best_weights, parallel.best_weights);
        assert_eq!(single.best_objective, parallel.best_objective);
    }

    #[test]
    fn test_expired_deadline_stops_early() {
        let outcome = RandomSearch::default()
            .run(
                &objective(),
                TuningBudget::iterations(1_000).with_deadline(Duration::ZERO),
                &mut StdRng::seed_from_u64(1),
                &NullObserver,
            )
            .unwrap();
        assert!(outcome.stopped_early);
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.best_objective, outcome.baseline_objective);
    }

    #[test]
    fn test_zero_progress_interval_rejected() {
        let search = RandomSearch::new(RandomSearchConfig {
            workers: 1,
            progress_interval: 0,
        });
        let result = search.run(
            &objective(),
            TuningBudget::iterations(1),
            &mut StdRng::seed_from_u64(1),
            &NullObserver,
        );
        assert!(result.is_err());
    }
}
