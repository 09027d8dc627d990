//! Pricing engine configuration and per-call overrides.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Grade, WeightVector};
use crate::error::ConfigError;

/// Most `(buy, sell)` pairs a valid configuration may ask the generator to
/// examine in one call.
pub const MAX_GRID_PAIRS: usize = 1_000_000;

/// Hard-constraint windows, soft targets and risk parameters for one run.
///
/// Built once per call by merging [`PricingOverrides`] onto a base config
/// and validated before any candidate is enumerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Smallest acceptable margin per lot.
    #[serde(default = "default_margin_min")]
    pub margin_min: Decimal,
    /// Largest acceptable margin per lot.
    #[serde(default = "default_margin_max")]
    pub margin_max: Decimal,
    #[serde(default = "default_spread_min")]
    pub spread_min: Decimal,
    #[serde(default = "default_spread_max")]
    pub spread_max: Decimal,
    /// Smallest allowed gap between the public price and the sell price.
    #[serde(default = "default_discount_min")]
    pub discount_min: Decimal,
    /// Largest allowed gap between the public price and the sell price.
    #[serde(default = "default_discount_max")]
    pub discount_max: Decimal,
    /// Price grid increment.
    #[serde(default = "default_step")]
    pub step: Decimal,
    /// How far below the public price buy prices are searched.
    #[serde(default = "default_search_range")]
    pub search_range: Decimal,
    /// Margin the profit-target dimension aims for.
    #[serde(default = "default_target_margin")]
    pub target_margin: Decimal,
    #[serde(default)]
    pub weights: WeightVector,
    /// Multiple of settlement volatility the margin should cover.
    #[serde(default = "default_volatility_multiplier")]
    pub volatility_multiplier: f64,
    /// Relative deviation above the moving average that starts a penalty.
    #[serde(default = "default_ma_deviation_threshold")]
    pub ma_deviation_threshold: f64,
    /// Margins below `margin_min + margin_low_buffer` raise `MARGIN_LOW`.
    #[serde(default = "default_margin_low_buffer")]
    pub margin_low_buffer: Decimal,
    /// Maximum alternatives returned beside the optimal candidate.
    #[serde(default = "default_top_n_alternatives")]
    pub top_n_alternatives: usize,
    #[serde(default = "default_source_grade")]
    pub source_grade: Grade,
    #[serde(default = "default_settlement_grade")]
    pub settlement_grade: Grade,
    /// Units of source-grade material in one reference lot.
    #[serde(default = "default_lot_size")]
    pub lot_size: Decimal,
}

fn default_margin_min() -> Decimal {
    Decimal::from(500_000)
}

fn default_margin_max() -> Decimal {
    Decimal::from(8_000_000)
}

fn default_spread_min() -> Decimal {
    Decimal::from(200_000)
}

fn default_spread_max() -> Decimal {
    Decimal::from(600_000)
}

fn default_discount_min() -> Decimal {
    Decimal::from(100_000)
}

fn default_discount_max() -> Decimal {
    Decimal::from(200_000)
}

fn default_step() -> Decimal {
    Decimal::from(50_000)
}

fn default_search_range() -> Decimal {
    Decimal::from(800_000)
}

fn default_target_margin() -> Decimal {
    Decimal::from(4_500_000)
}

const fn default_volatility_multiplier() -> f64 {
    100.0
}

const fn default_ma_deviation_threshold() -> f64 {
    1.0
}

fn default_margin_low_buffer() -> Decimal {
    Decimal::from(500_000)
}

const fn default_top_n_alternatives() -> usize {
    20
}

const fn default_source_grade() -> Grade {
    Grade::G610
}

const fn default_settlement_grade() -> Grade {
    Grade::G950
}

fn default_lot_size() -> Decimal {
    Decimal::TEN
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            margin_min: default_margin_min(),
            margin_max: default_margin_max(),
            spread_min: default_spread_min(),
            spread_max: default_spread_max(),
            discount_min: default_discount_min(),
            discount_max: default_discount_max(),
            step: default_step(),
            search_range: default_search_range(),
            target_margin: default_target_margin(),
            weights: WeightVector::default(),
            volatility_multiplier: default_volatility_multiplier(),
            ma_deviation_threshold: default_ma_deviation_threshold(),
            margin_low_buffer: default_margin_low_buffer(),
            top_n_alternatives: default_top_n_alternatives(),
            source_grade: default_source_grade(),
            settlement_grade: default_settlement_grade(),
            lot_size: default_lot_size(),
        }
    }
}

impl PricingConfig {
    /// Copy of this config with every present override applied.
    ///
    /// `weights` replaces the whole vector; there is no per-dimension merge.
    #[must_use]
    pub fn with_overrides(&self, overrides: &PricingOverrides) -> Self {
        Self {
            margin_min: overrides.margin_min.unwrap_or(self.margin_min),
            margin_max: overrides.margin_max.unwrap_or(self.margin_max),
            spread_min: overrides.spread_min.unwrap_or(self.spread_min),
            spread_max: overrides.spread_max.unwrap_or(self.spread_max),
            discount_min: overrides.discount_min.unwrap_or(self.discount_min),
            discount_max: overrides.discount_max.unwrap_or(self.discount_max),
            step: overrides.step.unwrap_or(self.step),
            search_range: overrides.search_range.unwrap_or(self.search_range),
            target_margin: overrides.target_margin.unwrap_or(self.target_margin),
            weights: overrides.weights.unwrap_or(self.weights),
            volatility_multiplier: overrides
                .volatility_multiplier
                .unwrap_or(self.volatility_multiplier),
            ma_deviation_threshold: overrides
                .ma_deviation_threshold
                .unwrap_or(self.ma_deviation_threshold),
            margin_low_buffer: overrides.margin_low_buffer.unwrap_or(self.margin_low_buffer),
            top_n_alternatives: overrides
                .top_n_alternatives
                .unwrap_or(self.top_n_alternatives),
            source_grade: overrides.source_grade.unwrap_or(self.source_grade),
            settlement_grade: overrides.settlement_grade.unwrap_or(self.settlement_grade),
            lot_size: overrides.lot_size.unwrap_or(self.lot_size),
        }
    }

    /// Upper bound on the pairs the generator examines: buy grid points
    /// times spread grid points. `None` when the count is not representable.
    #[must_use]
    pub fn grid_pairs(&self) -> Option<usize> {
        let buys = grid_points(self.search_range, self.step)?;
        let spreads = grid_points(self.spread_max.checked_sub(self.spread_min)?, self.step)?;
        buys.checked_mul(spreads)
    }

    /// Reject configurations that could not terminate or mean anything.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step <= Decimal::ZERO {
            return Err(ConfigError::invalid("step", "must be positive"));
        }
        if self.search_range <= Decimal::ZERO {
            return Err(ConfigError::invalid("search_range", "must be positive"));
        }
        if self.margin_min > self.margin_max {
            return Err(ConfigError::invalid(
                "margin_min",
                format!("{} exceeds margin_max {}", self.margin_min, self.margin_max),
            ));
        }
        if self.spread_min > self.spread_max {
            return Err(ConfigError::invalid(
                "spread_min",
                format!("{} exceeds spread_max {}", self.spread_min, self.spread_max),
            ));
        }
        if self.discount_min > self.discount_max {
            return Err(ConfigError::invalid(
                "discount_min",
                format!(
                    "{} exceeds discount_max {}",
                    self.discount_min, self.discount_max
                ),
            ));
        }
        match self.grid_pairs() {
            Some(pairs) if pairs <= MAX_GRID_PAIRS => {}
            _ => {
                return Err(ConfigError::invalid(
                    "step",
                    format!(
                        "grid exceeds {MAX_GRID_PAIRS} pairs \
                         (raise step or narrow search_range and the spread window)"
                    ),
                ))
            }
        }
        if !self.weights.is_finite() {
            return Err(ConfigError::invalid("weights", "must be finite"));
        }
        if !self.volatility_multiplier.is_finite() || self.volatility_multiplier < 0.0 {
            return Err(ConfigError::invalid(
                "volatility_multiplier",
                "must be finite and non-negative",
            ));
        }
        if !self.ma_deviation_threshold.is_finite() {
            return Err(ConfigError::invalid("ma_deviation_threshold", "must be finite"));
        }
        if self.margin_low_buffer < Decimal::ZERO {
            return Err(ConfigError::invalid("margin_low_buffer", "must not be negative"));
        }
        if self.lot_size <= Decimal::ZERO {
            return Err(ConfigError::invalid("lot_size", "must be positive"));
        }
        Ok(())
    }
}

/// Grid points in `[0, span]` at `step` spacing.
fn grid_points(span: Decimal, step: Decimal) -> Option<usize> {
    span.checked_div(step)?.floor().to_usize()?.checked_add(1)
}

/// Optional replacement for each [`PricingConfig`] field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_max: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread_min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread_max: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_max: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_range: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_margin: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightVector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_deviation_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_low_buffer: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_n_alternatives: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_grade: Option<Grade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_grade: Option<Grade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_size: Option<Decimal>,
}

impl PricingOverrides {
    /// Overrides that only replace the weight vector.
    #[must_use]
    pub fn with_weights(weights: WeightVector) -> Self {
        Self {
            weights: Some(weights),
            ..Self::default()
        }
    }
}
