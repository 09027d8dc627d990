//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`TuningObserver`] - Weight-tuning progress events (logging, progress
//!   bars, test recorders)

pub mod outbound;

pub use outbound::observer::{
    LogObserver, NullObserver, ObserverRegistry, TuningEvent, TuningObserver,
};
