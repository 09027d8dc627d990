//! Karat - gold alloy pricing engine.
//!
//! Recommends an internal buy/sell price pair for a lower-purity source
//! grade, given the public reference prices of the source grade and a
//! high-purity settlement grade. Candidate pairs are enumerated on a price
//! grid, filtered by hard constraints, scored on five soft dimensions and
//! ranked; the winner gets a risk classification.
//!
//! A weight-tuning layer searches the five-dimensional weight vector
//! offline (random search or simulated annealing) against a set of
//! scenarios.
//!
//! # Modules
//!
//! - [`domain`] - Grades, candidates, weights, market context and statuses
//! - [`application::pricing`] - Generator, scorer, selector, safety, engine
//! - [`application::tuning`] - Objective, random search, simulated annealing
//! - [`application::comparison`] - Internal quotes against the settlement price
//! - [`port`] - Observer port for tuning progress
//! - [`infrastructure`] - Settings file and logging
//! - [`adapter`] - Command-line interface
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use karat::application::pricing::{PricingEngine, PricingRequest};
//! use rust_decimal_macros::dec;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = PricingEngine::default();
//!     let request = PricingRequest::new(dec!(11_000_000), dec!(16_000_000))
//!         .with_history(vec![dec!(15_900_000), dec!(16_050_000)]);
//!     let result = engine.run(&request)?;
//!     if let Some(optimal) = &result.optimal {
//!         println!(
//!             "buy {} sell {}",
//!             optimal.candidate().buy_price(),
//!             optimal.candidate().sell_price()
//!         );
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
