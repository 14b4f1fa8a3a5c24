//! Signed monetary amount.
//!
//! Wraps `rust_decimal` so that amounts parsed from the export compare exactly
//! (the visibility rules test for `600` and `10`) and render without
//! floating-point noise.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// A signed amount: positive for money out, negative for money in.
///
/// Keeps the precision it was parsed with. Rounding to cents only happens
/// when the amount is displayed.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use aib_ledger::Amount;
///
/// let amount = Amount::from_str("12.5").unwrap();
/// assert_eq!(amount.to_string(), "12.50");
/// assert_eq!((-amount).to_string(), "-12.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Number of decimal places used when rendering.
    pub const DISPLAY_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Creates an amount, folding negative zero into plain zero.
    pub fn new(value: Decimal) -> Self {
        if value.is_zero() {
            Amount::ZERO
        } else {
            Amount(value)
        }
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Rounds to cents, half away from zero, always carrying two decimals.
    pub fn rounded(&self) -> Decimal {
        let mut rounded = self
            .0
            .round_dp_with_strategy(Self::DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            rounded = Decimal::ZERO;
        }
        rounded.rescale(Self::DISPLAY_SCALE);
        rounded
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::new(Decimal::from(value))
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Amount::new(Decimal::from_str(s)?))
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Amount::new(-self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rounded())
    }
}
