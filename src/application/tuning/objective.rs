//! Scenario-based objective for weight tuning.
//!
//! The pricing engine is a black box here: each weight vector is priced
//! against every labeled scenario, and the resulting optimal candidates are
//! penalized for missing the desk's business targets. Lower is better.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::pricing::{PricingConfig, PricingEngine, PricingOverrides, PricingRequest};
use crate::domain::WeightVector;
use crate::error::ConfigError;

/// A labeled market situation to tune against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub source_price: Decimal,
    pub settlement_price: Decimal,
    /// Settlement history, oldest first.
    #[serde(default)]
    pub history: Vec<Decimal>,
}

impl Scenario {
    #[must_use]
    pub fn new(source_price: Decimal, settlement_price: Decimal) -> Self {
        Self {
            name: None,
            source_price,
            settlement_price,
            history: Vec::new(),
        }
    }
}

/// Business targets the tuned optimum is measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectiveTargets {
    /// Buy discounts below this are penalized.
    #[serde(default = "default_min_buy_discount")]
    pub min_buy_discount: Decimal,
    #[serde(default = "default_fine_scale")]
    pub buy_discount_scale: Decimal,
    /// Preferred gap between public and sell price.
    #[serde(default = "default_sell_discount")]
    pub sell_discount: Decimal,
    #[serde(default = "default_fine_scale")]
    pub sell_discount_scale: Decimal,
    #[serde(default = "default_margin")]
    pub margin: Decimal,
    #[serde(default = "default_margin_scale")]
    pub margin_scale: Decimal,
    #[serde(default = "default_spread")]
    pub spread: Decimal,
    #[serde(default = "default_fine_scale")]
    pub spread_scale: Decimal,
    /// Charged when a scenario has no solution or fails.
    #[serde(default = "default_no_solution_penalty")]
    pub no_solution_penalty: f64,
}

fn default_min_buy_discount() -> Decimal {
    Decimal::from(200_000)
}

fn default_sell_discount() -> Decimal {
    Decimal::from(100_000)
}

fn default_margin() -> Decimal {
    Decimal::from(4_000_000)
}

fn default_margin_scale() -> Decimal {
    Decimal::from(100_000)
}

fn default_spread() -> Decimal {
    Decimal::from(500_000)
}

fn default_fine_scale() -> Decimal {
    Decimal::from(10_000)
}

const fn default_no_solution_penalty() -> f64 {
    10_000.0
}

impl Default for ObjectiveTargets {
    fn default() -> Self {
        Self {
            min_buy_discount: default_min_buy_discount(),
            buy_discount_scale: default_fine_scale(),
            sell_discount: default_sell_discount(),
            sell_discount_scale: default_fine_scale(),
            margin: default_margin(),
            margin_scale: default_margin_scale(),
            spread: default_spread(),
            spread_scale: default_fine_scale(),
            no_solution_penalty: default_no_solution_penalty(),
        }
    }
}

impl ObjectiveTargets {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a non-positive scale or a
    /// non-finite penalty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scales = [
            ("buy_discount_scale", self.buy_discount_scale),
            ("sell_discount_scale", self.sell_discount_scale),
            ("margin_scale", self.margin_scale),
            ("spread_scale", self.spread_scale),
        ];
        for (field, scale) in scales {
            if scale <= Decimal::ZERO {
                return Err(ConfigError::invalid(field, "must be positive"));
            }
        }
        if !self.no_solution_penalty.is_finite() {
            return Err(ConfigError::invalid("no_solution_penalty", "must be finite"));
        }
        Ok(())
    }
}

/// Mean penalty of a weight vector across scenarios.
#[derive(Debug, Clone)]
pub struct Objective {
    engine: PricingEngine,
    scenarios: Vec<Scenario>,
    targets: ObjectiveTargets,
}

impl Objective {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an empty scenario set, an invalid base
    /// configuration or invalid targets.
    pub fn new(
        base: PricingConfig,
        scenarios: Vec<Scenario>,
        targets: ObjectiveTargets,
    ) -> Result<Self, ConfigError> {
        if scenarios.is_empty() {
            return Err(ConfigError::invalid(
                "scenarios",
                "at least one scenario is required",
            ));
        }
        base.validate()?;
        targets.validate()?;
        Ok(Self {
            engine: PricingEngine::new(base),
            scenarios,
            targets,
        })
    }

    /// Weights of the base configuration, the tuning baseline.
    #[must_use]
    pub fn base_weights(&self) -> WeightVector {
        self.engine.config().weights
    }

    #[must_use]
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    #[must_use]
    pub const fn targets(&self) -> &ObjectiveTargets {
        &self.targets
    }

    /// Mean scenario penalty for `weights`.
    #[must_use]
    pub fn evaluate(&self, weights: &WeightVector) -> f64 {
        let total: f64 = self
            .scenarios
            .iter()
            .map(|scenario| self.scenario_penalty(scenario, weights))
            .sum();
        total / self.scenarios.len() as f64
    }

    /// Penalty for one scenario. Engine errors and empty results cost the
    /// fixed no-solution penalty.
    #[must_use]
    pub fn scenario_penalty(&self, scenario: &Scenario, weights: &WeightVector) -> f64 {
        let request = PricingRequest::new(scenario.source_price, scenario.settlement_price)
            .with_history(scenario.history.clone())
            .with_overrides(PricingOverrides::with_weights(*weights));

        let optimal = match self.engine.run(&request) {
            Ok(result) => result.optimal,
            Err(_) => None,
        };
        let Some(optimal) = optimal else {
            return self.targets.no_solution_penalty;
        };

        let t = &self.targets;
        let c = optimal.candidate();
        let shortfall = (f(t.min_buy_discount) - f(c.buy_discount())).max(0.0);

        shortfall / f(t.buy_discount_scale)
            + distance(c.discount_from_public(), t.sell_discount, t.sell_discount_scale)
            + distance(c.margin(), t.margin, t.margin_scale)
            + distance(c.spread(), t.spread, t.spread_scale)
    }
}

fn f(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// `|actual - target| / scale`, in `f64` so extreme targets cannot overflow.
fn distance(actual: Decimal, target: Decimal, scale: Decimal) -> f64 {
    (f(actual) - f(target)).abs() / f(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_scenarios_rejected() {
        let err = Objective::new(PricingConfig::default(), vec![], ObjectiveTargets::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "scenarios", .. }));
    }

    #[test]
    fn test_invalid_scale_rejected() {
        let targets = ObjectiveTargets {
            margin_scale: Decimal::ZERO,
            ..ObjectiveTargets::default()
        };
        let scenarios = vec![Scenario::new(dec!(11_000_000), dec!(16_000_000))];
        assert!(Objective::new(PricingConfig::default(), scenarios, targets).is_err());
    }

    #[test]
    fn test_infeasible_scenario_costs_fixed_penalty() {
        let objective = Objective::new(
            PricingConfig::default(),
            vec![Scenario::new(Decimal::ZERO, dec!(16_000_000))],
            ObjectiveTargets::default(),
        )
        .unwrap();
        assert_eq!(objective.evaluate(&WeightVector::default()), 10_000.0);
    }

    #[test]
    fn test_engine_error_costs_fixed_penalty() {
        let objective = Objective::new(
            PricingConfig::default(),
            vec![Scenario::new(dec!(11_000_000), Decimal::ZERO)],
            ObjectiveTargets::default(),
        )
        .unwrap();
        assert_eq!(objective.evaluate(&WeightVector::default()), 10_000.0);
    }

    #[test]
    fn test_overflowing_scenario_costs_fixed_penalty() {
        let source = Decimal::from_i128_with_scale(10_i128.pow(28), 0);
        let objective = Objective::new(
            PricingConfig::default(),
            vec![Scenario::new(source, dec!(16_000_000))],
            ObjectiveTargets::default(),
        )
        .unwrap();
        assert_eq!(objective.evaluate(&WeightVector::default()), 10_000.0);
    }

    #[test]
    fn test_reference_scenario_penalty() {
        // Single candidate: buy 10.2M, sell 10.8M, margin ~736,842.
        let objective = Objective::new(
            PricingConfig::default(),
            vec![Scenario::new(dec!(11_000_000), dec!(16_000_000))],
            ObjectiveTargets::default(),
        )
        .unwrap();
        let penalty = objective.evaluate(&WeightVector::default());
        // 0 (buy) + 10 (sell) + ~32.63 (margin) + 10 (spread)
        let expected = 10.0 + (4_000_000.0 - 736_842.105_263_157_9) / 100_000.0 + 10.0;
        assert!((penalty - expected).abs() < 1e-6, "{penalty} vs {expected}");
    }

    #[test]
    fn test_mean_across_scenarios() {
        let objective = Objective::new(
            PricingConfig::default(),
            vec![
                Scenario::new(dec!(11_000_000), dec!(16_000_000)),
                Scenario::new(Decimal::ZERO, dec!(16_000_000)),
            ],
            ObjectiveTargets::default(),
        )
        .unwrap();
        let single = objective.scenario_penalty(&objective.scenarios()[0], &WeightVector::default());
        let mean = objective.evaluate(&WeightVector::default());
        assert!((mean - (single + 10_000.0) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_scenario_from_toml() {
        let scenario: Scenario = toml::from_str(
            r#"
            name = "calm"
            source_price = 11000000
            settlement_price = 16000000
            history = [15900000, 16000000]
            "#,
        )
        .unwrap();
        assert_eq!(scenario.name.as_deref(), Some("calm"));
        assert_eq!(scenario.history.len(), 2);
    }
}
