//! Observer port for weight-tuning progress.
//!
//! The tuners never print. They report through a [`TuningObserver`] the
//! caller injects: logging, a progress bar, or a recorder in tests.

use crate::domain::{Algorithm, WeightVector};

/// Events emitted while tuning.
#[derive(Debug, Clone, PartialEq)]
pub enum TuningEvent {
    /// Search is about to start; the baseline has been evaluated.
    Started {
        algorithm: Algorithm,
        iterations: usize,
        baseline_objective: f64,
    },
    /// A new best-ever weight vector was found.
    Improved {
        iteration: usize,
        objective: f64,
        weights: WeightVector,
    },
    /// Periodic progress report.
    Progress {
        iteration: usize,
        total: usize,
        best_objective: f64,
        current_objective: f64,
        /// Annealing temperature; `None` for random search.
        temperature: Option<f64>,
    },
    /// Search finished, either exhausting its budget or hitting the deadline.
    Finished {
        iterations: usize,
        best_objective: f64,
        stopped_early: bool,
    },
}

/// Receiver for tuning events.
///
/// Implementations must be thread-safe (`Send + Sync`) and return quickly;
/// events are delivered on the tuning thread.
pub trait TuningObserver: Send + Sync {
    /// Handle an event.
    fn observe(&self, event: TuningEvent);
}

/// Broadcasts events to every registered observer.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Box<dyn TuningObserver>>,
}

impl ObserverRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: Box<dyn TuningObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl TuningObserver for ObserverRegistry {
    fn observe(&self, event: TuningEvent) {
        for observer in &self.observers {
            observer.observe(event.clone());
        }
    }
}

/// Discards every event.
pub struct NullObserver;

impl TuningObserver for NullObserver {
    fn observe(&self, _event: TuningEvent) {}
}

/// Logs events via tracing.
pub struct LogObserver;

impl TuningObserver for LogObserver {
    fn observe(&self, event: TuningEvent) {
        use tracing::{debug, info};
        match event {
            TuningEvent::Started {
                algorithm,
                iterations,
                baseline_objective,
            } => {
                info!(%algorithm, iterations, baseline = baseline_objective, "Tuning started");
            }
            TuningEvent::Improved {
                iteration,
                objective,
                weights,
            } => {
                debug!(
                    iteration,
                    objective,
                    profit_target_proximity = weights.profit_target_proximity,
                    competitiveness = weights.competitiveness,
                    spread_utility = weights.spread_utility,
                    volatility_safety = weights.volatility_safety,
                    ma_reversion_safety = weights.ma_reversion_safety,
                    "New best weights"
                );
            }
            TuningEvent::Progress {
                iteration,
                total,
                best_objective,
                current_objective,
                temperature,
            } => {
                info!(
                    iteration,
                    total,
                    best = best_objective,
                    current = current_objective,
                    temperature = ?temperature,
                    "Tuning progress"
                );
            }
            TuningEvent::Finished {
                iterations,
                best_objective,
                stopped_early,
            } => {
                info!(iterations, best = best_objective, stopped_early, "Tuning finished");
            }
        }
    }
}
