//! Iteration and wall-clock limits for a tuning run.

use std::time::{Duration, Instant};

/// Iteration and wall-clock limits; the search stops at whichever comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuningBudget {
    pub iterations: usize,
    /// Time limit measured from the start of the search.
    pub deadline: Option<Duration>,
}

impl TuningBudget {
    #[must_use]
    pub const fn iterations(iterations: usize) -> Self {
        Self {
            iterations,
            deadline: None,
        }
    }

    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub(crate) fn expires_at(&self, started: Instant) -> Option<Instant> {
        self.deadline.map(|d| started + d)
    }
}

pub(crate) fn expired(expires_at: Option<Instant>) -> bool {
    expires_at.is_some_and(|at| Instant::now() >= at)
}
