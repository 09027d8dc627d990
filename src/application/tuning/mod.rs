//! Offline tuning of the scoring weight vector.
//!
//! Two searches minimize the scenario [`Objective`]:
//!
//! - [`RandomSearch`] - uniform draws from the weight simplex, evaluated in
//!   parallel batches
//! - [`Annealing`] - simulated annealing from the base weights, sequential
//!
//! Both take an injected RNG so runs are reproducible for a fixed seed, a
//! [`TuningBudget`] bounding iterations and wall-clock time, and a
//! [`TuningObserver`](crate::port::TuningObserver) for progress.

mod annealing;
mod budget;
mod objective;
mod outcome;
mod random_search;

pub use annealing::{Annealing, AnnealingConfig};
pub use budget::TuningBudget;
pub use objective::{Objective, ObjectiveTargets, Scenario};
pub use outcome::{percent_improvement, TuningOutcome};
pub use random_search::{random_weights, RandomSearch, RandomSearchConfig};
