//! Integer money type.
//!
//! All amounts are whole cents. Nothing in the crate does arithmetic on
//! floating point dollars.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An amount of money in cents.
///
/// # Example
///
/// ```rust
/// use vending::core::Money;
///
/// let price: Money = "2.50".parse().unwrap();
/// assert_eq!(price.cents(), 250);
/// assert_eq!(price.times(2).to_string(), "$5.00");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

/// Error returned when text cannot be read as an amount.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("amount is empty")]
    Empty,

    #[error("amount '{0}' is not a number")]
    Malformed(String),

    #[error("amount '{0}' has more than two decimal places")]
    TooPrecise(String),

    #[error("amount '{0}' is negative")]
    Negative(String),

    #[error("amount '{0}' is too large")]
    Overflow(String),
}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Money(cents)
    }

    /// Whole dollars, no cents.
    pub const fn from_dollars(dollars: u64) -> Self {
        Money(dollars.saturating_mul(100))
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Price of `quantity` units. Saturates instead of overflowing.
    pub const fn times(self, quantity: u32) -> Self {
        Money(self.0.saturating_mul(quantity as u64))
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Convert a dollar amount read from a config file.
    ///
    /// Rounds to the nearest cent. Negative, NaN and infinite values are
    /// rejected.
    pub fn from_dollars_f64(dollars: f64) -> Result<Money, MoneyParseError> {
        let text = dollars.to_string();
        if !dollars.is_finite() {
            return Err(MoneyParseError::Malformed(text));
        }
        if dollars < 0.0 {
            return Err(MoneyParseError::Negative(text));
        }
        let cents = (dollars * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(MoneyParseError::Overflow(text));
        }
        Ok(Money(cents as u64))
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        if text.starts_with('-') {
            return Err(MoneyParseError::Negative(text.to_string()));
        }
        let digits = text.strip_prefix('$').unwrap_or(text);

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
            return Err(MoneyParseError::Malformed(text.to_string()));
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooPrecise(text.to_string()));
        }

        let overflow = || MoneyParseError::Overflow(text.to_string());
        let dollars: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let cents: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| overflow())? * 10,
            _ => fraction.parse().map_err(|_| overflow())?,
        };

        dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(overflow)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = (self.0 / 100).to_string();
        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, c) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        write!(f, "${}.{:02}", grouped, self.0 % 100)
    }
}
