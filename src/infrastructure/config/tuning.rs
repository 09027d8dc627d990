//! Weight-tuning configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::tuning::{
    AnnealingConfig, ObjectiveTargets, RandomSearchConfig, Scenario, TuningBudget,
};
use crate::domain::Algorithm;
use crate::error::ConfigError;

/// The `[tuning]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuningSettings {
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Iterations; defaults to 100 for random search and 200 for annealing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    /// RNG seed; a fresh one is drawn when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Wall-clock limit in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_secs: Option<u64>,
    /// Random-search parallelism; defaults to the CPU count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    #[serde(default = "default_initial_temperature")]
    pub initial_temperature: f64,
    #[serde(default = "default_cooling_rate")]
    pub cooling_rate: f64,
    #[serde(default = "default_perturbation")]
    pub perturbation: f64,
    #[serde(default)]
    pub targets: ObjectiveTargets,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

const fn default_initial_temperature() -> f64 {
    1.0
}

const fn default_cooling_rate() -> f64 {
    0.995
}

const fn default_perturbation() -> f64 {
    0.1
}

impl Default for TuningSettings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            iterations: None,
            seed: None,
            deadline_secs: None,
            workers: None,
            initial_temperature: default_initial_temperature(),
            cooling_rate: default_cooling_rate(),
            perturbation: default_perturbation(),
            targets: ObjectiveTargets::default(),
            scenarios: Vec::new(),
        }
    }
}

impl TuningSettings {
    /// Configured iterations, or the algorithm's default.
    #[must_use]
    pub fn effective_iterations(&self, algorithm: Algorithm) -> usize {
        self.iterations.unwrap_or(match algorithm {
            Algorithm::Random => 100,
            Algorithm::Annealing => 200,
        })
    }

    #[must_use]
    pub fn budget(&self, algorithm: Algorithm) -> TuningBudget {
        let budget = TuningBudget::iterations(self.effective_iterations(algorithm));
        match self.deadline_secs {
            Some(secs) => budget.with_deadline(Duration::from_secs(secs)),
            None => budget,
        }
    }

    #[must_use]
    pub fn annealing_config(&self) -> AnnealingConfig {
        AnnealingConfig {
            initial_temperature: self.initial_temperature,
            cooling_rate: self.cooling_rate,
            perturbation: self.perturbation,
            ..AnnealingConfig::default()
        }
    }

    #[must_use]
    pub fn random_search_config(&self) -> RandomSearchConfig {
        let defaults = RandomSearchConfig::default();
        RandomSearchConfig {
            workers: self.workers.unwrap_or(defaults.workers),
            ..defaults
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == Some(0) {
            return Err(ConfigError::invalid("iterations", "must be greater than 0"));
        }
        if self.workers == Some(0) {
            return Err(ConfigError::invalid("workers", "must be greater than 0"));
        }
        self.annealing_config().validate()?;
        self.targets.validate()
    }
}
