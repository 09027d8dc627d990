//! Pricing run output.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::config::PricingConfig;
use super::generator::RejectionStats;
use crate::domain::{RunStatus, SafetyStatus, SafetyWarning, ScoredCandidate};

/// Ranked recommendation for one pricing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub optimal: Option<ScoredCandidate>,
    /// Runners-up in descending total order; never contains the optimal pair.
    pub alternatives: Vec<ScoredCandidate>,
    pub meta: ResultMeta,
}

/// Run metadata and diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMeta {
    pub candidate_count: usize,
    pub status: RunStatus,
    /// Population standard deviation of the settlement history, if known.
    pub volatility_used: Option<f64>,
    /// Settlement moving average, if known.
    pub ma_used: Option<f64>,
    pub safety_status: SafetyStatus,
    pub warnings: Vec<SafetyWarning>,
    pub timestamp: DateTime<Utc>,
    pub elapsed_ms: f64,
    /// Effective configuration after overrides.
    pub config: PricingConfig,
    pub rejections: RejectionStats,
}

impl PricingResult {
    /// True when the result carries an optimal candidate.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.meta.status, RunStatus::Success)
    }
}
