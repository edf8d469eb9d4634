use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use thiserror::Error;

/// A monetary amount rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(Decimal);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid amount: {0}")]
pub struct ParseMoneyError(pub String);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::from(cents) / Decimal::from(100))
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal.round_dp(2))
    }

    pub fn to_decimal(self) -> Decimal {
        self.0
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Absolute distance between two amounts.
    pub fn abs_diff(self, other: Money) -> Money {
        Money((self.0 - other.0).abs())
    }
}

/// Accepts the forms bank and GL exports actually contain: an optional
/// leading `$`, thousands commas, and accounting parentheses for negatives.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, trimmed) = if trimmed.starts_with('(') && trimmed.ends_with(')') {
            (true, &trimmed[1..trimmed.len() - 1])
        } else {
            (false, trimmed)
        };
        let cleaned = trimmed.replace([',', '$', ' '], "");
        let mut dec =
            Decimal::from_str(&cleaned).map_err(|_| ParseMoneyError(s.trim().to_string()))?;
        if negative {
            dec = -dec;
        }
        Ok(Money(dec.round_dp(2)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}
