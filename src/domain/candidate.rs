//! Price-pair candidates and their scores.

use rust_decimal::Decimal;
use serde::Serialize;

use super::weights::WeightVector;

/// A feasible `(buy, sell)` price pair with its derived economics.
///
/// Built only by the generator after every hard constraint holds, so
/// `sell_price > buy_price` always.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    buy_price: Decimal,
    sell_price: Decimal,
    spread: Decimal,
    discount_from_public: Decimal,
    buy_discount: Decimal,
    margin: Decimal,
    converted_quantity: Decimal,
    cost: Decimal,
    value: Decimal,
}

impl Candidate {
    /// Derive spread, discounts and margin from the pair and lot economics.
    #[must_use]
    pub fn new(
        buy_price: Decimal,
        sell_price: Decimal,
        source_price: Decimal,
        converted_quantity: Decimal,
        cost: Decimal,
        value: Decimal,
    ) -> Self {
        Self {
            buy_price,
            sell_price,
            spread: sell_price - buy_price,
            discount_from_public: source_price - sell_price,
            buy_discount: source_price - buy_price,
            margin: value - cost,
            converted_quantity,
            cost,
            value,
        }
    }

    #[must_use]
    pub const fn buy_price(&self) -> Decimal {
        self.buy_price
    }

    #[must_use]
    pub const fn sell_price(&self) -> Decimal {
        self.sell_price
    }

    #[must_use]
    pub const fn spread(&self) -> Decimal {
        self.spread
    }

    /// Source reference price minus sell price.
    #[must_use]
    pub const fn discount_from_public(&self) -> Decimal {
        self.discount_from_public
    }

    /// Source reference price minus buy price.
    #[must_use]
    pub const fn buy_discount(&self) -> Decimal {
        self.buy_discount
    }

    /// Settlement value of the converted lot minus its acquisition cost.
    #[must_use]
    pub const fn margin(&self) -> Decimal {
        self.margin
    }

    #[must_use]
    pub const fn converted_quantity(&self) -> Decimal {
        self.converted_quantity
    }

    #[must_use]
    pub const fn cost(&self) -> Decimal {
        self.cost
    }

    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.value
    }
}

/// Per-dimension scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub profit_target_proximity: f64,
    pub competitiveness: f64,
    pub spread_utility: f64,
    pub volatility_safety: f64,
    pub ma_reversion_safety: f64,
}

impl ScoreBreakdown {
    /// Signed weighted sum. Weights are not normalized.
    #[must_use]
    pub fn weighted_total(&self, weights: &WeightVector) -> f64 {
        self.profit_target_proximity * weights.profit_target_proximity
            + self.competitiveness * weights.competitiveness
            + self.spread_utility * weights.spread_utility
            + self.volatility_safety * weights.volatility_safety
            + self.ma_reversion_safety * weights.ma_reversion_safety
    }
}

/// Weighted total with the breakdown it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub total: f64,
    pub breakdown: ScoreBreakdown,
}

/// A candidate paired with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    #[serde(flatten)]
    candidate: Candidate,
    total: f64,
    breakdown: ScoreBreakdown,
}

impl ScoredCandidate {
    #[must_use]
    pub const fn new(candidate: Candidate, score: Score) -> Self {
        Self {
            candidate,
            total: score.total,
            breakdown: score.breakdown,
        }
    }

    #[must_use]
    pub const fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    #[must_use]
    pub const fn total(&self) -> f64 {
        self.total
    }

    #[must_use]
    pub const fn breakdown(&self) -> &ScoreBreakdown {
        &self.breakdown
    }

    /// True when both prices match `other`.
    #[must_use]
    pub fn same_pair(&self, other: &Self) -> bool {
        self.candidate.buy_price == other.candidate.buy_price
            && self.candidate.sell_price == other.candidate.sell_price
    }
}
