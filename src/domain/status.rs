//! Run and safety status enums carried in pricing results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a pricing run produced any candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Success,
    NoValidCandidates,
}

/// Categorical risk summary of the optimal candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyStatus {
    NoSolution,
    Safe,
    Caution,
    Warning,
}

impl SafetyStatus {
    /// Status for an optimal candidate with `flags` raised warnings.
    #[must_use]
    pub const fn from_flag_count(flags: usize) -> Self {
        match flags {
            0 => Self::Safe,
            1 => Self::Caution,
            _ => Self::Warning,
        }
    }
}

/// A single raised safety flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyWarning {
    /// Margin sits within the low buffer above the minimum margin.
    MarginLow,
    /// Margin is thin relative to settlement volatility.
    HighVolatility,
    /// Settlement price is stretched above its moving average.
    PriceAboveMa,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::NoValidCandidates => write!(f, "NO_VALID_CANDIDATES"),
        }
    }
}

impl fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSolution => write!(f, "NO_SOLUTION"),
            Self::Safe => write!(f, "SAFE"),
            Self::Caution => write!(f, "CAUTION"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

impl fmt::Display for SafetyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarginLow => write!(f, "MARGIN_LOW"),
            Self::HighVolatility => write!(f, "HIGH_VOLATILITY"),
            Self::PriceAboveMa => write!(f, "PRICE_ABOVE_MA"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flag_count() {
        assert_eq!(SafetyStatus::from_flag_count(0), SafetyStatus::Safe);
        assert_eq!(SafetyStatus::from_flag_count(1), SafetyStatus::Caution);
        assert_eq!(SafetyStatus::from_flag_count(3), SafetyStatus::Warning);
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_string(&RunStatus::NoValidCandidates).unwrap(),
            "\"NO_VALID_CANDIDATES\""
        );
        assert_eq!(
            serde_json::to_string(&SafetyWarning::PriceAboveMa).unwrap(),
            "\"PRICE_ABOVE_MA\""
        );
        assert_eq!(SafetyStatus::Caution.to_string(), "CAUTION");
    }
}
