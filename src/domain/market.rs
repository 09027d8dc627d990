//! Market context derived once per pricing call.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Reference prices plus statistics over the settlement history.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketContext {
    source_price: Decimal,
    settlement_price: Decimal,
    moving_average: Option<f64>,
    volatility: Option<f64>,
}

impl MarketContext {
    /// Build the context, deriving moving average and volatility from `history`.
    ///
    /// The moving average needs at least one point and a positive mean;
    /// volatility needs at least two points.
    #[must_use]
    pub fn new(source_price: Decimal, settlement_price: Decimal, history: &[Decimal]) -> Self {
        Self {
            source_price,
            settlement_price,
            moving_average: moving_average(history).filter(|ma| *ma > 0.0),
            volatility: population_std_dev(history),
        }
    }

    #[must_use]
    pub const fn source_price(&self) -> Decimal {
        self.source_price
    }

    #[must_use]
    pub const fn settlement_price(&self) -> Decimal {
        self.settlement_price
    }

    #[must_use]
    pub const fn moving_average(&self) -> Option<f64> {
        self.moving_average
    }

    #[must_use]
    pub const fn volatility(&self) -> Option<f64> {
        self.volatility
    }
}

fn to_f64s(history: &[Decimal]) -> Vec<f64> {
    history.iter().map(|p| p.to_f64().unwrap_or(0.0)).collect()
}

/// Arithmetic mean; `None` for an empty history.
#[must_use]
pub fn moving_average(history: &[Decimal]) -> Option<f64> {
    if history.is_empty() {
        return None;
    }
    let values = to_f64s(history);
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation; `None` with fewer than two points.
#[must_use]
pub fn population_std_dev(history: &[Decimal]) -> Option<f64> {
    if history.len() < 2 {
        return None;
    }
    let values = to_f64s(history);
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt())
}
