//! Money type for representing currency amounts
//!
//! Wraps a `rust_decimal::Decimal` so that sums and currency conversions stay
//! exact. The amount carries no currency of its own; callers pair it with a
//! [`CurrencyCode`](super::CurrencyCode).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// A signed decimal monetary amount
///
/// Serialized as a plain JSON number, matching the data file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from a decimal value
    ///
    /// # Examples
    /// ```
    /// use bank_ledger::models::Money;
    /// use rust_decimal::Decimal;
    /// let amount = Money::new(Decimal::new(1050, 2)); // 10.50
    /// ```
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal value
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Add two amounts, or `None` if the result is out of range
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Multiply by an exchange rate, or `None` if the result is out of range
    pub fn checked_convert(self, rate: Decimal) -> Option<Self> {
        self.0.checked_mul(rate).map(Self)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "+10", "1,000.25"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
        let cleaned = cleaned.strip_prefix('+').unwrap_or(&cleaned);

        if cleaned.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        Decimal::from_str(cleaned)
            .map(Self)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))
    }

    /// Format followed by a currency code, e.g. "250.00 USD"
    pub fn format_with_code(&self, code: &super::CurrencyCode) -> String {
        format!("{} {}", self, code)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::new(dec!(10.5))), "10.50");
        assert_eq!(format!("{}", Money::zero()), "0.00");
        assert_eq!(format!("{}", Money::new(dec!(-10.5))), "-10.50");
        assert_eq!(format!("{}", Money::new(dec!(0.05))), "0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(dec!(10));
        let b = Money::new(dec!(-5));

        assert_eq!(a.checked_add(b), Some(Money::new(dec!(5))));
        assert_eq!(-a, Money::new(dec!(-10)));
    }

    #[test]
    fn test_convert_is_exact() {
        let amount = Money::new(dec!(-1000));
        assert_eq!(amount.checked_convert(dec!(0.9)), Some(Money::new(dec!(-900))));

        let amount = Money::new(dec!(0.1));
        assert_eq!(amount.checked_convert(dec!(3)), Some(Money::new(dec!(0.3))));
    }

    #[test]
    fn test_out_of_range_is_none() {
        let max = Money::new(Decimal::MAX);
        assert_eq!(max.checked_add(Money::new(dec!(1))), None);
        assert_eq!(max.checked_convert(dec!(2)), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap(), Money::new(dec!(10.5)));
        assert_eq!(Money::parse("-10.50").unwrap(), Money::new(dec!(-10.5)));
        assert_eq!(Money::parse("+10").unwrap(), Money::new(dec!(10)));
        assert_eq!(Money::parse(" 1,000.25 ").unwrap(), Money::new(dec!(1000.25)));
        assert!(Money::parse("").is_err());
        assert!(Money::parse("ten").is_err());
    }

    #[test]
    fn test_is_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::new(dec!(-1)).is_negative());
    }

    #[test]
    fn test_serialization() {
        let m: Money = serde_json::from_str("-200").unwrap();
        assert_eq!(m, Money::new(dec!(-200)));

        let m: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(m, Money::new(dec!(12.5)));

        let json = serde_json::to_string(&Money::new(dec!(12.5))).unwrap();
        assert_eq!(json, "12.5");
    }
}
