//! Candidate generation over the discrete price grid.
//!
//! The grid hangs down from the public source price, snapped to the step,
//! but is walked upward: buy prices are enumerated lowest first. Selection
//! breaks ties by generation order, so equal scores favor the lowest buy
//! price. Each buy price is paired with every spread in the spread window;
//! only pairs passing all three hard constraints survive.
//!
//! All price arithmetic is checked. A market whose lot value does not fit
//! in a `Decimal` is an input error, never a panic.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::config::PricingConfig;
use crate::domain::{convert_quantity, value_of, Candidate};
use crate::error::{ConfigError, InputError, Result};

/// Why pairs were discarded, counted by the first failing predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionStats {
    /// Pairs examined.
    pub evaluated: usize,
    /// Sell price outside the discount window.
    pub discount: usize,
    /// Sell price not above buy price.
    pub ordering: usize,
    /// Margin outside the margin window.
    pub margin: usize,
}

impl RejectionStats {
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.discount + self.ordering + self.margin
    }
}

/// Feasible candidates in generation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    pub candidates: Vec<Candidate>,
    pub rejections: RejectionStats,
}

impl CandidateSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }
}

/// Number of whole steps in a non-negative `span`.
fn steps_in(span: Decimal, step: Decimal) -> Result<usize> {
    span.checked_div(step)
        .and_then(|steps| steps.floor().to_usize())
        .ok_or_else(|| {
            ConfigError::invalid("step", format!("{span} / {step} is not a grid size")).into()
        })
}

const fn out_of_range(field: &'static str) -> InputError {
    InputError::OutOfRange { field }
}

/// Enumerate every feasible `(buy, sell)` pair.
///
/// A non-positive `source` yields an empty set.
///
/// # Errors
///
/// Returns a config error for a configuration [`PricingConfig::validate`]
/// rejects, before any pair is examined, and an input error when a price
/// or lot value overflows `Decimal`.
pub fn generate(
    source: Decimal,
    settlement: Decimal,
    config: &PricingConfig,
) -> Result<CandidateSet> {
    config.validate()?;

    let mut set = CandidateSet::default();
    if source <= Decimal::ZERO {
        debug!(%source, "non-positive source price, nothing to generate");
        return Ok(set);
    }

    let step = config.step;
    let start = source
        .checked_div(step)
        .and_then(|steps| steps.floor().checked_mul(step))
        .ok_or(out_of_range("source_price"))?;
    let end = start.saturating_sub(config.search_range).max(Decimal::ZERO);
    let buy_steps = steps_in(start - end, step)?;
    let spread_steps = steps_in(config.spread_max - config.spread_min, step)?;

    let converted_quantity =
        convert_quantity(config.lot_size, config.source_grade, config.settlement_grade)
            .ok_or(out_of_range("lot_size"))?;
    let value = value_of(converted_quantity, settlement).ok_or(out_of_range("settlement_price"))?;

    for k in (0..=buy_steps).rev() {
        let buy = start - step * Decimal::from(k);
        let cost = value_of(config.lot_size, buy).ok_or(out_of_range("source_price"))?;
        let margin = value.checked_sub(cost).ok_or(out_of_range("settlement_price"))?;

        for j in 0..=spread_steps {
            let sell = buy
                .checked_add(config.spread_min + step * Decimal::from(j))
                .ok_or(out_of_range("spread_max"))?;
            set.rejections.evaluated += 1;

            let discount = source.checked_sub(sell).ok_or(out_of_range("spread_min"))?;
            if discount < config.discount_min || discount > config.discount_max {
                set.rejections.discount += 1;
                continue;
            }
            if sell <= buy {
                set.rejections.ordering += 1;
                continue;
            }
            if margin < config.margin_min || margin > config.margin_max {
                set.rejections.margin += 1;
                continue;
            }

            set.candidates
                .push(Candidate::new(buy, sell, source, converted_quantity, cost, value));
        }
    }

    debug!(
        %start,
        %end,
        accepted = set.candidates.len(),
        evaluated = set.rejections.evaluated,
        rejected_discount = set.rejections.discount,
        rejected_ordering = set.rejections.ordering,
        rejected_margin = set.rejections.margin,
        "generated candidates"
    );

    Ok(set)
}
