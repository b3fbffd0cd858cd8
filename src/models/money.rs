//! Money type for offerings
//!
//! Amounts are held as whole cents in an `i64` so monthly totals add up
//! exactly. Offerings are never negative, so subtraction is not provided.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign};
use thiserror::Error;

/// A monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use returns_cli::models::Money;
    /// let amount = Money::from_cents(12050);
    /// assert_eq!(amount.to_string(), "120.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// The amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole currency units (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// The fractional part in cents (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse an amount typed into a form field
    ///
    /// Accepts `""` (zero), `"120"`, `"120."`, `"120.5"`, `"120.50"` and
    /// `".5"`. Signs, currency symbols and more than two fractional digits
    /// are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::zero());
        }

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac.len() > 2 {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Sum two amounts, `None` on overflow
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Format with a currency symbol, e.g. `£120.50`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{}{}", symbol, self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("Invalid amount: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("120.50").unwrap().cents(), 12050);
        assert_eq!(Money::parse("120.5").unwrap().cents(), 12050);
        assert_eq!(Money::parse("120").unwrap().cents(), 12000);
        assert_eq!(Money::parse("120.").unwrap().cents(), 12000);
        assert_eq!(Money::parse(".05").unwrap().cents(), 5);
        assert_eq!(Money::parse("").unwrap(), Money::zero());
        assert_eq!(Money::parse("  30.00 ").unwrap().cents(), 3000);
    }

    #[test]
    fn test_parse_rejects() {
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("-5").is_err());
        assert!(Money::parse("$5").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("abc").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(12050).to_string(), "120.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(12050).format_with_symbol("£"), "£120.50");
    }

    #[test]
    fn test_sum_is_exact() {
        // 0.10 added ten times is exactly 1.00
        let total: Money = std::iter::repeat(Money::from_cents(10)).take(10).sum();
        assert_eq!(total, Money::from_cents(100));
    }

    #[test]
    fn test_checked_add_reports_overflow() {
        let big = Money::from_cents(i64::MAX - 1);
        assert_eq!(big.checked_add(Money::from_cents(1)), Some(Money::from_cents(i64::MAX)));
        assert_eq!(big.checked_add(Money::from_cents(2)), None);
    }

    #[test]
    fn test_parse_error_message() {
        let err = Money::parse("1.234").unwrap_err();
        assert_eq!(err.to_string(), "Invalid amount: 1.234");
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let m = Money::from_cents(15050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"150.50\"");

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
