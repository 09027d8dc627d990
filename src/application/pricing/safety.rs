//! Categorical risk classification of the optimal candidate.

use crate::domain::{SafetyStatus, SafetyWarning, ScoredCandidate};

use super::config::PricingConfig;

const FLAG_THRESHOLD: f64 = 50.0;

/// Safety status with the flags that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub status: SafetyStatus,
    pub warnings: Vec<SafetyWarning>,
}

/// Classify the optimal candidate.
///
/// Volatility and moving-average flags only fire when the respective
/// statistic is known.
#[must_use]
pub fn classify(
    optimal: Option<&ScoredCandidate>,
    volatility: Option<f64>,
    moving_average: Option<f64>,
    config: &PricingConfig,
) -> Assessment {
    let Some(optimal) = optimal else {
        return Assessment {
            status: SafetyStatus::NoSolution,
            warnings: Vec::new(),
        };
    };

    let mut warnings = Vec::new();
    let low_margin = config
        .margin_min
        .checked_add(config.margin_low_buffer)
        .map_or(true, |floor| optimal.candidate().margin() < floor);
    if low_margin {
        warnings.push(SafetyWarning::MarginLow);
    }
    if volatility.is_some() && optimal.breakdown().volatility_safety < FLAG_THRESHOLD {
        warnings.push(SafetyWarning::HighVolatility);
    }
    if moving_average.is_some() && optimal.breakdown().ma_reversion_safety < FLAG_THRESHOLD {
        warnings.push(SafetyWarning::PriceAboveMa);
    }

    Assessment {
        status: SafetyStatus::from_flag_count(warnings.len()),
        warnings,
    }
}
