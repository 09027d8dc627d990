//! Five-dimension candidate scoring.
//!
//! Every dimension lands in `[0, 100]`. Dimensions that cannot be computed
//! (a zero-width window, missing history) score a neutral 50. Differences
//! are taken in `f64` so extreme windows cannot overflow `Decimal`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::config::PricingConfig;
use crate::domain::{Candidate, MarketContext, Score, ScoreBreakdown, ScoredCandidate};

const NEUTRAL: f64 = 50.0;

fn f(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Closeness of the margin to the target, relative to the margin window.
#[must_use]
pub fn profit_target_proximity(candidate: &Candidate, config: &PricingConfig) -> f64 {
    let width = f(config.margin_max) - f(config.margin_min);
    if width == 0.0 {
        return NEUTRAL;
    }
    let distance = (f(candidate.margin()) - f(config.target_margin)).abs();
    (100.0 - distance / width * 100.0).max(0.0)
}

/// How far below the public price the buy price sits.
#[must_use]
pub fn competitiveness(
    candidate: &Candidate,
    context: &MarketContext,
    config: &PricingConfig,
) -> f64 {
    let range = f(config.search_range);
    if range <= 0.0 {
        return NEUTRAL;
    }
    let gap = f(context.source_price()) - f(candidate.buy_price());
    (gap / range * 150.0).clamp(0.0, 100.0)
}

/// Position of the spread within the spread window.
#[must_use]
pub fn spread_utility(candidate: &Candidate, config: &PricingConfig) -> f64 {
    let width = f(config.spread_max) - f(config.spread_min);
    if width == 0.0 {
        return NEUTRAL;
    }
    ((f(candidate.spread()) - f(config.spread_min)) / width * 100.0).clamp(0.0, 100.0)
}

/// Margin headroom against a volatility-scaled adverse move.
#[must_use]
pub fn volatility_safety(
    candidate: &Candidate,
    context: &MarketContext,
    config: &PricingConfig,
) -> f64 {
    let Some(sigma) = context.volatility() else {
        return NEUTRAL;
    };
    let required = config.volatility_multiplier * sigma * f(candidate.converted_quantity());
    if required <= 0.0 {
        return 100.0;
    }
    (f(candidate.margin()) / required * 50.0).clamp(0.0, 100.0)
}

/// Penalty for a settlement price stretched above its moving average.
#[must_use]
pub fn ma_reversion_safety(context: &MarketContext, config: &PricingConfig) -> f64 {
    let Some(ma) = context.moving_average() else {
        return NEUTRAL;
    };
    let deviation = (f(context.settlement_price()) - ma) / ma;
    if deviation > config.ma_deviation_threshold {
        let penalty = ((deviation - config.ma_deviation_threshold) * 1000.0).min(100.0);
        (100.0 - penalty).max(0.0)
    } else {
        100.0
    }
}

/// Score one candidate. Pure.
#[must_use]
pub fn score(candidate: &Candidate, context: &MarketContext, config: &PricingConfig) -> Score {
    let breakdown = ScoreBreakdown {
        profit_target_proximity: profit_target_proximity(candidate, config),
        competitiveness: competitiveness(candidate, context, config),
        spread_utility: spread_utility(candidate, config),
        volatility_safety: volatility_safety(candidate, context, config),
        ma_reversion_safety: ma_reversion_safety(context, config),
    };
    Score {
        total: breakdown.weighted_total(&config.weights),
        breakdown,
    }
}

/// Score every candidate, preserving generation order.
#[must_use]
pub fn score_all(
    candidates: &[Candidate],
    context: &MarketContext,
    config: &PricingConfig,
) -> Vec<ScoredCandidate> {
    candidates
        .iter()
        .map(|c| ScoredCandidate::new(c.clone(), score(c, context, config)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{convert_quantity, value_of};
    use rust_decimal_macros::dec;

    fn candidate(buy: Decimal, sell: Decimal, source: Decimal, settlement: Decimal) -> Candidate {
        let config = PricingConfig::default();
        let qty = convert_quantity(config.lot_size, config.source_grade, config.settlement_grade)
            .unwrap();
        Candidate::new(
            buy,
            sell,
            source,
            qty,
            value_of(config.lot_size, buy).unwrap(),
            value_of(qty, settlement).unwrap(),
        )
    }

    fn reference() -> (Candidate, MarketContext) {
        let source = dec!(11_000_000);
        let settlement = dec!(16_000_000);
        (
            candidate(dec!(10_200_000), dec!(10_800_000), source, settlement),
            MarketContext::new(source, settlement, &[]),
        )
    }

    #[test]
    fn test_dimensions_within_bounds() {
        let (c, ctx) = reference();
        let config = PricingConfig::default();
        let s = score(&c, &ctx, &config).breakdown;
        for v in [
            s.profit_target_proximity,
            s.competitiveness,
            s.spread_utility,
            s.volatility_safety,
            s.ma_reversion_safety,
        ] {
            assert!((0.0..=100.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn test_competitiveness_formula() {
        let (c, ctx) = reference();
        // 800k / 800k * 150, clamped
        assert_eq!(competitiveness(&c, &ctx, &PricingConfig::default()), 100.0);

        let near = candidate(dec!(10_800_000), dec!(10_900_000), dec!(11_000_000), dec!(16_000_000));
        let v = competitiveness(&near, &ctx, &PricingConfig::default());
        assert!((v - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_spread_utility_formula() {
        let (c, _) = reference();
        assert_eq!(spread_utility(&c, &PricingConfig::default()), 100.0);

        let config = PricingConfig {
            spread_min: dec!(600_000),
            ..PricingConfig::default()
        };
        assert_eq!(spread_utility(&c, &config), 50.0);
    }

    #[test]
    fn test_profit_target_zero_width_is_neutral() {
        let (c, _) = reference();
        let config = PricingConfig {
            margin_min: dec!(1_000_000),
            margin_max: dec!(1_000_000),
            ..PricingConfig::default()
        };
        assert_eq!(profit_target_proximity(&c, &config), 50.0);
    }

    #[test]
    fn test_profit_target_floor_at_zero() {
        let (c, _) = reference();
        let config = PricingConfig {
            margin_min: dec!(0),
            margin_max: dec!(1_000_000),
            target_margin: dec!(5_000_000),
            ..PricingConfig::default()
        };
        assert_eq!(profit_target_proximity(&c, &config), 0.0);
    }

    #[test]
    fn test_volatility_safety_needs_two_points() {
        let (c, _) = reference();
        let config = PricingConfig::default();
        let one = MarketContext::new(dec!(11_000_000), dec!(16_000_000), &[dec!(16_000_000)]);
        assert_eq!(volatility_safety(&c, &one, &config), 50.0);

        let flat = MarketContext::new(
            dec!(11_000_000),
            dec!(16_000_000),
            &[dec!(16_000_000), dec!(16_000_000)],
        );
        assert_eq!(volatility_safety(&c, &flat, &config), 100.0);

        let noisy = MarketContext::new(
            dec!(11_000_000),
            dec!(16_000_000),
            &[dec!(15_000_000), dec!(17_000_000)],
        );
        assert!(volatility_safety(&c, &noisy, &config) < 50.0);
    }

    #[test]
    fn test_ma_reversion_penalty() {
        let config = PricingConfig {
            ma_deviation_threshold: 0.05,
            ..PricingConfig::default()
        };
        let calm = MarketContext::new(dec!(1), dec!(100), &[dec!(100)]);
        assert_eq!(ma_reversion_safety(&calm, &config), 100.0);

        // deviation 0.1, penalty (0.1 - 0.05) * 1000 = 50
        let stretched = MarketContext::new(dec!(1), dec!(110), &[dec!(100)]);
        assert!((ma_reversion_safety(&stretched, &config) - 50.0).abs() < 1e-9);

        let extreme = MarketContext::new(dec!(1), dec!(200), &[dec!(100)]);
        assert_eq!(ma_reversion_safety(&extreme, &config), 0.0);

        let none = MarketContext::new(dec!(1), dec!(200), &[]);
        assert_eq!(ma_reversion_safety(&none, &config), 50.0);
    }

    #[test]
    fn test_total_is_weighted_sum() {
        let (c, ctx) = reference();
        let config = PricingConfig::default();
        let s = score(&c, &ctx, &config);
        assert_eq!(s.total, s.breakdown.weighted_total(&config.weights));
    }

    #[test]
    fn test_score_all_preserves_order() {
        let (c, ctx) = reference();
        let other = candidate(dec!(10_250_000), dec!(10_800_000), dec!(11_000_000), dec!(16_000_000));
        let scored = score_all(&[c.clone(), other.clone()], &ctx, &PricingConfig::default());
        assert_eq!(scored[0].candidate(), &c);
        assert_eq!(scored[1].candidate(), &other);
    }
}
