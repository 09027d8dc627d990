//! Gold grades and the pure conversion helpers built on them.
//!
//! A grade is a purity tier in domain units (610, 950, 999, ...). Converting
//! a quantity between grades is linear in the grade ratio, so converting
//! there and back again returns the original quantity.
//!
//! # Examples
//!
//! ```
//! use karat::domain::grade::{convert_quantity, Grade};
//! use rust_decimal_macros::dec;
//!
//! let converted = convert_quantity(dec!(9.5), Grade::G610, Grade::G950);
//! assert_eq!(converted, Some(dec!(6.1)));
//! ```

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// A gold purity tier in domain units. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Grade(u32);

impl Grade {
    /// 41% (10K) alloy.
    pub const G410: Self = Self(410);
    /// 58% (14K) alloy.
    pub const G580: Self = Self(580);
    /// 61% alloy, the default source grade.
    pub const G610: Self = Self(610);
    /// 68% alloy.
    pub const G680: Self = Self(680);
    /// 75% (18K) alloy.
    pub const G750: Self = Self(750);
    /// 95% alloy, the default settlement grade.
    pub const G950: Self = Self(950);
    /// 98% alloy.
    pub const G980: Self = Self(980);
    /// 98.5% alloy.
    pub const G985: Self = Self(985);
    /// 99.9% bullion.
    pub const G999: Self = Self(999);

    /// Create a grade, rejecting zero.
    pub const fn try_new(value: u32) -> Result<Self, InputError> {
        if value == 0 {
            return Err(InputError::NonPositiveGrade(value));
        }
        Ok(Self(value))
    }

    /// Raw grade value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Map a display code to the grade used for conversion.
    ///
    /// Shops list 24K product under the code `9999`, but it is settled as
    /// 950 material.
    #[must_use]
    pub fn from_display_code(code: u32) -> Option<Self> {
        match code {
            9999 => Some(Self::G950),
            other => Self::try_new(other).ok(),
        }
    }

    /// Infer the grade from a product label.
    ///
    /// Recognizes the usual shop markings ("SJC", "9T85", "V75", "6T1",
    /// "14K", ...) and explicit percentages, then falls back to the first
    /// run of 2-4 digits. Unrecognized labels are treated as bullion.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        const RULES: &[(&[&str], Grade)] = &[
            (&["SJC", "99,9%", "99.9%"], Grade::G999),
            (&["9T85", "98,5%", "98.5%"], Grade::G985),
            (&["9T8", "98,0%", "98.0%"], Grade::G980),
            (&["95"], Grade::G950),
            (&["V75", "75,0%", "75.0%"], Grade::G750),
            (&["V68", "68,0%", "68.0%"], Grade::G680),
            (&["6T1", "61,0%", "61.0%"], Grade::G610),
            (&["14K", "58,0%", "58.0%"], Grade::G580),
            (&["10K", "41,0%", "41.0%"], Grade::G410),
        ];

        for (markers, grade) in RULES {
            if markers.iter().any(|marker| label.contains(marker)) {
                return *grade;
            }
        }

        first_number(label)
            .and_then(|value| Self::try_new(value).ok())
            .unwrap_or(Self::G999)
    }

    /// Nominal purity in percent.
    #[must_use]
    pub fn purity_percent(self) -> f64 {
        match self.0 {
            999.. => 99.5,
            985..=998 => 98.5,
            980..=984 => 98.0,
            950..=979 => 95.0,
            750..=949 => 75.0,
            680..=749 => 68.0,
            610..=679 => 61.0,
            580..=609 => 58.0,
            410..=579 => 41.0,
            other => f64::from(other) / 10.0,
        }
    }
}

impl TryFrom<u32> for Grade {
    type Error = InputError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Grade> for u32 {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// First run of at least two digits, truncated to four.
fn first_number(label: &str) -> Option<u32> {
    let bytes = label.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i - start >= 2 {
                let end = start + (i - start).min(4);
                return label[start..end].parse().ok();
            }
        } else {
            i += 1;
        }
    }
    None
}

/// Convert a quantity of `from`-grade material into its `to`-grade equivalent.
///
/// `quantity × from / to`; linear and round-trip symmetric. `None` when the
/// result overflows `Decimal`.
#[must_use]
pub fn convert_quantity(quantity: Decimal, from: Grade, to: Grade) -> Option<Decimal> {
    quantity
        .checked_mul(Decimal::from(from.value()))?
        .checked_div(Decimal::from(to.value()))
}

/// Value of `quantity` units at `unit_price`. No hidden scaling.
///
/// `None` on overflow.
#[must_use]
pub fn value_of(quantity: Decimal, unit_price: Decimal) -> Option<Decimal> {
    quantity.checked_mul(unit_price)
}

/// Round `value` to the nearest multiple of `step` (halves away from zero).
///
/// A non-positive step, or one too fine to represent the quotient, leaves
/// the value untouched.
#[must_use]
pub fn round_to_step(value: Decimal, step: Decimal) -> Decimal {
    if step <= Decimal::ZERO {
        return value;
    }
    value
        .checked_div(step)
        .and_then(|steps| {
            steps
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .checked_mul(step)
        })
        .unwrap_or(value)
}

/// Percentage change from `original` to `new`; zero when `original` is zero.
#[must_use]
pub fn percentage_diff(new: Decimal, original: Decimal) -> f64 {
    use rust_decimal::prelude::ToPrimitive;

    if original.is_zero() {
        return 0.0;
    }
    new.checked_sub(original)
        .and_then(|diff| diff.checked_div(original))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|percent| percent.to_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convert_quantity_is_linear() {
        let converted = convert_quantity(dec!(10), Grade::G610, Grade::G950).unwrap();
        assert!((converted * dec!(950) - dec!(6100)).abs() < dec!(0.000000001));
        assert_eq!(convert_quantity(dec!(9.5), Grade::G610, Grade::G950), Some(dec!(6.1)));
    }

    #[test]
    fn test_convert_round_trip() {
        for (a, b) in [(610, 950), (950, 610), (410, 999), (750, 750)] {
            let a = Grade::try_new(a).unwrap();
            let b = Grade::try_new(b).unwrap();
            let x = dec!(12.345);
            let there = convert_quantity(x, a, b).unwrap();
            let back = convert_quantity(there, b, a).unwrap();
            assert!((back - x).abs() < dec!(0.000000000001), "{a}->{b}: {back}");
        }
    }

    #[test]
    fn test_value_of_has_no_scaling() {
        assert_eq!(value_of(dec!(10), dec!(11000000)), Some(dec!(110000000)));
    }

    #[test]
    fn test_overflow_is_none() {
        assert_eq!(value_of(dec!(10), Decimal::MAX), None);
        assert_eq!(convert_quantity(Decimal::MAX, Grade::G950, Grade::G610), None);
        assert_eq!(round_to_step(Decimal::MAX, Decimal::new(1, 27)), Decimal::MAX);
        assert_eq!(percentage_diff(Decimal::MAX, Decimal::MIN), 0.0);
    }

    #[test]
    fn test_zero_grade_rejected() {
        assert!(matches!(Grade::try_new(0), Err(InputError::NonPositiveGrade(0))));
        assert!(serde_json::from_str::<Grade>("0").is_err());
        assert_eq!(serde_json::from_str::<Grade>("610").unwrap(), Grade::G610);
    }

    #[test]
    fn test_display_code_mapping() {
        assert_eq!(Grade::from_display_code(9999), Some(Grade::G950));
        assert_eq!(Grade::from_display_code(610), Some(Grade::G610));
        assert_eq!(Grade::from_display_code(0), None);
    }

    #[test]
    fn test_from_label_markers() {
        assert_eq!(Grade::from_label("Vàng SJC 1L"), Grade::G999);
        assert_eq!(Grade::from_label("Nhẫn 9T85"), Grade::G985);
        assert_eq!(Grade::from_label("Vàng 9T8"), Grade::G980);
        assert_eq!(Grade::from_label("Vàng 950"), Grade::G950);
        assert_eq!(Grade::from_label("Vàng V75"), Grade::G750);
        assert_eq!(Grade::from_label("Vàng 6T1"), Grade::G610);
        assert_eq!(Grade::from_label("Vàng 14K"), Grade::G580);
        assert_eq!(Grade::from_label("Vàng 10K"), Grade::G410);
    }

    #[test]
    fn test_from_label_fallbacks() {
        assert_eq!(Grade::from_label("Tuổi 710").value(), 710);
        assert_eq!(Grade::from_label("Mã 123456").value(), 1234);
        assert_eq!(Grade::from_label("no digits"), Grade::G999);
        assert_eq!(Grade::from_label("x7y"), Grade::G999);
    }

    #[test]
    fn test_purity_percent() {
        assert_eq!(Grade::G999.purity_percent(), 99.5);
        assert_eq!(Grade::G950.purity_percent(), 95.0);
        assert_eq!(Grade::G610.purity_percent(), 61.0);
        assert_eq!(Grade::try_new(300).unwrap().purity_percent(), 30.0);
    }

    #[test]
    fn test_round_to_step() {
        assert_eq!(round_to_step(dec!(10_024_999), dec!(50_000)), dec!(10_000_000));
        assert_eq!(round_to_step(dec!(10_025_000), dec!(50_000)), dec!(10_050_000));
        assert_eq!(round_to_step(dec!(123), Decimal::ZERO), dec!(123));
    }

    #[test]
    fn test_percentage_diff() {
        assert_eq!(percentage_diff(dec!(110), dec!(100)), 10.0);
        assert_eq!(percentage_diff(dec!(5), Decimal::ZERO), 0.0);
    }
}
