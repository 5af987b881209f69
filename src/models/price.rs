use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An exact money amount, stored in whole cents.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(transparent)]
pub struct Price(u64);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price is empty")]
    Empty,
    #[error("Invalid price: '{0}'")]
    Invalid(String),
    #[error("Price has more than two decimal places: '{0}'")]
    TooManyDecimals(String),
    #[error("Price is too large")]
    Overflow,
}

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    pub fn checked_add(self, other: Price) -> Option<Price> {
        self.0.checked_add(other.0).map(Price)
    }

    pub fn checked_mul(self, quantity: u32) -> Option<Price> {
        self.0.checked_mul(u64::from(quantity)).map(Price)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    /// Accepts `5`, `5.5`, `5.50` and an optional leading `$`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let raw = trimmed.strip_prefix('$').unwrap_or(trimmed);
        if raw.is_empty() {
            return Err(PriceError::Empty);
        }

        let (whole, fraction) = match raw.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (raw, ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(PriceError::Invalid(s.to_string()));
        }
        if fraction.len() > 2 {
            return Err(PriceError::TooManyDecimals(s.to_string()));
        }

        let dollars: u64 = whole.parse().map_err(|_| PriceError::Overflow)?;
        let cents: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| PriceError::Invalid(s.to_string()))? * 10,
            _ => fraction.parse().map_err(|_| PriceError::Invalid(s.to_string()))?,
        };

        dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Price)
            .ok_or(PriceError::Overflow)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("5.00".parse::<Price>().unwrap(), Price::from_cents(500));
        assert_eq!("3.5".parse::<Price>().unwrap(), Price::from_cents(350));
        assert_eq!("$2.95".parse::<Price>().unwrap(), Price::from_cents(295));
        assert_eq!("7".parse::<Price>().unwrap().to_string(), "$7.00");
        assert_eq!(Price::from_cents(1350).to_string(), "$13.50");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("".parse::<Price>(), Err(PriceError::Empty));
        assert!(matches!("-1".parse::<Price>(), Err(PriceError::Invalid(_))));
        assert!(matches!("1.234".parse::<Price>(), Err(PriceError::TooManyDecimals(_))));
        assert!(matches!("abc".parse::<Price>(), Err(PriceError::Invalid(_))));
        assert!(matches!(".50".parse::<Price>(), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Price::from_cents(350);
        assert_eq!(price.checked_mul(3), Some(Price::from_cents(1050)));
        assert_eq!(Price::from_cents(u64::MAX).checked_mul(2), None);
        assert_eq!(Price::from_cents(u64::MAX).checked_add(Price::from_cents(1)), None);
    }
}
