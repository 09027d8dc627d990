//! Ranked selection of scored candidates.

use crate::domain::{RunStatus, ScoredCandidate};

/// Optimal candidate plus ranked alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub optimal: Option<ScoredCandidate>,
    pub alternatives: Vec<ScoredCandidate>,
    pub status: RunStatus,
}

/// Rank `scored` by descending total and split off the optimal candidate.
///
/// The sort is stable, so equal totals keep generation order. At most
/// `limit` alternatives follow the optimal; the input is left untouched.
#[must_use]
pub fn select(scored: &[ScoredCandidate], limit: usize) -> Selection {
    if scored.is_empty() {
        return Selection {
            optimal: None,
            alternatives: Vec::new(),
            status: RunStatus::NoValidCandidates,
        };
    }

    let mut order: Vec<usize> = (0..scored.len()).collect();
    order.sort_by(|&a, &b| scored[b].total().total_cmp(&scored[a].total()));

    let mut ranked = order.into_iter().map(|i| scored[i].clone());
    let optimal = ranked.next();
    let alternatives = ranked.take(limit).collect();

    Selection {
        optimal,
        alternatives,
        status: RunStatus::Success,
    }
}
