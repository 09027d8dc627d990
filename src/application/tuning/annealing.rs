//! Simulated annealing over the weight simplex.
//!
//! Starts at the base weights. Each step perturbs every dimension by a
//! temperature-scaled uniform amount, floors it, renormalizes, and accepts
//! the neighbor by the Metropolis rule. Temperature decays geometrically and
//! never reheats. The best-ever vector is tracked apart from the current one.

use std::time::Instant;

use rand::Rng;

use super::budget::{expired, TuningBudget};
use super::outcome::{percent_improvement, TuningOutcome};
use super::Objective;
use crate::domain::{Algorithm, WeightVector};
use crate::error::{ConfigError, Result};
use crate::port::{TuningEvent, TuningObserver};

/// Configuration for simulated annealing.
#[derive(Debug, Clone)]
pub struct AnnealingConfig {
    /// Starting temperature.
    pub initial_temperature: f64,
    /// Multiplicative decay applied after every step.
    pub cooling_rate: f64,
    /// Perturbation width at temperature 1.
    pub perturbation: f64,
    /// Floor applied to each perturbed weight before renormalizing.
    pub min_weight: f64,
    /// Emit a progress event every this many iterations.
    pub progress_interval: usize,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1.0,
            cooling_rate: 0.995,
            perturbation: 0.1,
            min_weight: 0.01,
            progress_interval: 50,
        }
    }
}

impl AnnealingConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(ConfigError::invalid("initial_temperature", "must be positive"));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(ConfigError::invalid("cooling_rate", "must be in (0, 1]"));
        }
        if !(self.perturbation.is_finite() && self.perturbation >= 0.0) {
            return Err(ConfigError::invalid("perturbation", "must be non-negative"));
        }
        if !(self.min_weight.is_finite() && self.min_weight > 0.0) {
            return Err(ConfigError::invalid("min_weight", "must be positive"));
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::invalid("progress_interval", "must be positive"));
        }
        Ok(())
    }
}

/// Simulated annealing tuner.
#[derive(Debug, Clone, Default)]
pub struct Annealing {
    config: AnnealingConfig,
}

impl Annealing {
    #[must_use]
    pub const fn new(config: AnnealingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    /// Neighbor of `current` at temperature `temperature`.
    fn perturb<R: Rng + ?Sized>(
        &self,
        current: &WeightVector,
        temperature: f64,
        rng: &mut R,
    ) -> WeightVector {
        let amount = self.config.perturbation * temperature;
        let floor = self.config.min_weight;
        let moved = current
            .as_array()
            .map(|w| (w + (rng.gen::<f64>() - 0.5) * amount).max(floor));
        let moved = WeightVector::from_array(moved);
        moved.normalized().unwrap_or(moved)
    }

    /// Anneal from the base configuration's weights.
    ///
    /// # Errors
    ///
    /// Returns a config error when the annealing configuration is invalid.
    pub fn run<R: Rng + ?Sized>(
        &self,
        objective: &Objective,
        budget: TuningBudget,
        rng: &mut R,
        observer: &dyn TuningObserver,
    ) -> Result<TuningOutcome> {
        self.config.validate()?;

        let started = Instant::now();
        let expires_at = budget.expires_at(started);

        let mut current = objective.base_weights();
        let baseline = objective.evaluate(&current);
        observer.observe(TuningEvent::Started {
            algorithm: Algorithm::Annealing,
            iterations: budget.iterations,
            baseline_objective: baseline,
        });

        let mut current_score = baseline;
        let mut best_weights = current;
        let mut best = baseline;
        let mut temperature = self.config.initial_temperature;
        let mut completed = 0;
        let mut accepted = 0;
        let mut stopped_early = false;

        for iteration in 0..budget.iterations {
            if expired(expires_at) {
                stopped_early = true;
                break;
            }

            let neighbor = self.perturb(&current, temperature, rng);
            let score = objective.evaluate(&neighbor);
            let delta = score - current_score;

            if delta < 0.0 || rng.gen::<f64>() < (-delta / temperature).exp() {
                current = neighbor;
                current_score = score;
                accepted += 1;

                if score < best {
                    best = score;
                    best_weights = neighbor;
                    observer.observe(TuningEvent::Improved {
                        iteration,
                        objective: score,
                        weights: neighbor,
                    });
                }
            }

            temperature *= self.config.cooling_rate;
            completed = iteration + 1;

            if completed % self.config.progress_interval == 0 {
                observer.observe(TuningEvent::Progress {
                    iteration: completed,
                    total: budget.iterations,
                    best_objective: best,
                    current_objective: current_score,
                    temperature: Some(temperature),
                });
            }
        }

        observer.observe(TuningEvent::Finished {
            iterations: completed,
            best_objective: best,
            stopped_early,
        });

        Ok(TuningOutcome {
            algorithm: Algorithm::Annealing,
            best_weights,
            best_objective: best,
            baseline_objective: baseline,
            percent_improvement: percent_improvement(baseline, best),
            iterations: completed,
            accepted_moves: accepted,
            stopped_early,
        })
    }
}
