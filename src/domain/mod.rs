//! Pricing domain types and pure helpers.

pub mod algorithm;
pub mod candidate;
pub mod grade;
pub mod market;
pub mod status;
pub mod weights;

pub use algorithm::Algorithm;
pub use candidate::{Candidate, Score, ScoreBreakdown, ScoredCandidate};
pub use grade::{convert_quantity, percentage_diff, round_to_step, value_of, Grade};
pub use market::MarketContext;
pub use status::{RunStatus, SafetyStatus, SafetyWarning};
pub use weights::{WeightVector, DIMENSIONS};
