//! The three-stage pricing pipeline: generate, score, select.
//!
//! - [`generator`] enumerates feasible `(buy, sell)` pairs on the price grid
//! - [`scorer`] rates each pair on five `[0, 100]` dimensions
//! - [`selector`] ranks them and splits off the optimal candidate
//! - [`safety`] classifies the optimal candidate's risk
//! - [`engine`] wires the stages into one call

pub mod config;
pub mod engine;
pub mod generator;
pub mod result;
pub mod safety;
pub mod scorer;
pub mod selector;

pub use config::{PricingConfig, PricingOverrides, MAX_GRID_PAIRS};
pub use engine::{PricingEngine, PricingRequest};
pub use generator::{generate, CandidateSet, RejectionStats};
pub use result::{PricingResult, ResultMeta};
pub use safety::{classify, Assessment};
pub use scorer::{score, score_all};
pub use selector::{select, Selection};
