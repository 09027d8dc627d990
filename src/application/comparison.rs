//! Internal price comparison against the settlement reference.
//!
//! Shops quote internal buy/sell prices per unit of whatever grade they
//! stock. To compare them with the public settlement-grade price, each
//! price is restated as the value of the settlement-grade equivalent of one
//! unit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{convert_quantity, percentage_diff, value_of, Grade};
use crate::error::InputError;

/// An internally quoted product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalQuote {
    pub name: String,
    /// Grade as displayed by the shop, e.g. `610` or `9999`.
    pub display_code: u32,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
}

/// One quote restated in settlement-grade terms.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub name: String,
    pub display_code: u32,
    /// Grade used for conversion.
    pub grade: Grade,
    pub purity_percent: f64,
    pub original_buy: Decimal,
    pub original_sell: Decimal,
    pub converted_buy: Decimal,
    pub converted_sell: Decimal,
    pub buy_diff: Decimal,
    pub sell_diff: Decimal,
    pub buy_percent: f64,
    pub sell_percent: f64,
    pub reference_price: Decimal,
}

/// Value of the settlement-grade equivalent of one unit bought at `price`.
///
/// `None` when the value overflows.
#[must_use]
pub fn settlement_equivalent(
    price: Decimal,
    grade: Grade,
    settlement_grade: Grade,
) -> Option<Decimal> {
    value_of(convert_quantity(Decimal::ONE, grade, settlement_grade)?, price)
}

/// Resolve a grade argument to a display code: either the code itself or a
/// product label to infer it from.
///
/// # Errors
///
/// Returns [`InputError::NonPositiveGrade`] for the code `0`.
pub fn resolve_display_code(input: &str) -> Result<u32, InputError> {
    let trimmed = input.trim();
    match trimmed.parse::<u32>() {
        Ok(0) => Err(InputError::NonPositiveGrade(0)),
        Ok(code) => Ok(code),
        Err(_) => Ok(Grade::from_label(trimmed).value()),
    }
}

/// Compare one quote with the settlement reference price.
///
/// Returns `None` when the quote has neither a buy nor a sell price.
/// Non-positive sides convert to zero.
///
/// # Errors
///
/// Returns an input error for a negative reference price, a zero display
/// code, or a price whose equivalent overflows.
pub fn compare(
    quote: &InternalQuote,
    reference: Decimal,
    settlement_grade: Grade,
) -> Result<Option<Comparison>, InputError> {
    if reference < Decimal::ZERO {
        return Err(InputError::NonPositivePrice {
            field: "reference_price",
            value: reference,
        });
    }
    if quote.buy_price <= Decimal::ZERO && quote.sell_price <= Decimal::ZERO {
        return Ok(None);
    }

    let grade = Grade::from_display_code(quote.display_code)
        .ok_or(InputError::NonPositiveGrade(quote.display_code))?;
    let convert = |price: Decimal, field: &'static str| {
        if price > Decimal::ZERO {
            settlement_equivalent(price, grade, settlement_grade)
                .ok_or(InputError::OutOfRange { field })
        } else {
            Ok(Decimal::ZERO)
        }
    };
    let converted_buy = convert(quote.buy_price, "buy_price")?;
    let converted_sell = convert(quote.sell_price, "sell_price")?;

    Ok(Some(Comparison {
        name: quote.name.clone(),
        display_code: quote.display_code,
        grade,
        purity_percent: grade.purity_percent(),
        original_buy: quote.buy_price,
        original_sell: quote.sell_price,
        converted_buy,
        converted_sell,
        buy_diff: converted_buy - reference,
        sell_diff: converted_sell - reference,
        buy_percent: percentage_diff(converted_buy, reference),
        sell_percent: percentage_diff(converted_sell, reference),
        reference_price: reference,
    }))
}

/// Compare every quote, skipping those without prices.
///
/// # Errors
///
/// Fails on the first quote [`compare`] rejects.
pub fn compare_all(
    quotes: &[InternalQuote],
    reference: Decimal,
    settlement_grade: Grade,
) -> Result<Vec<Comparison>, InputError> {
    let mut out = Vec::with_capacity(quotes.len());
    for quote in quotes {
        if let Some(comparison) = compare(quote, reference, settlement_grade)? {
            out.push(comparison);
        }
    }
    Ok(out)
}
