//! Money type for representing rupee amounts
//!
//! Internally stores amounts in paise (i64) to avoid floating-point precision
//! issues. The persisted document stores amounts as plain JSON numbers in
//! rupees (`12500`, `1234.5`), so serialization converts at the boundary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Represents a monetary amount stored as paise (hundredths of a rupee)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from paise
    ///
    /// # Examples
    /// ```
    /// use vyapaar_track::models::Money;
    /// let amount = Money::from_paise(1050); // ₹10.50
    /// assert_eq!(amount.rupees(), 10);
    /// ```
    pub const fn from_paise(paise: i64) -> Self {
        Self(paise)
    }

    /// Create a Money amount from whole rupees
    pub const fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }

    /// Create a Money amount from a decimal rupee value, rounding to the
    /// nearest paisa
    pub fn from_decimal(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in paise
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Get the whole rupees portion (truncated toward zero)
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Get the paise portion (0-99)
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Get the amount as a decimal rupee value
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Divide evenly across `count` items, rounding to the nearest paisa.
    /// Returns zero when `count` is zero.
    pub fn average_over(&self, count: usize) -> Self {
        if count == 0 {
            return Self::zero();
        }
        Self::from_decimal(self.0 as f64 / 100.0 / count as f64)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "₹10.50", "Rs. 1,250", "10"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s
            .strip_prefix('₹')
            .or_else(|| s.strip_prefix("Rs."))
            .or_else(|| s.strip_prefix("Rs"))
            .unwrap_or(s)
            .trim();
        let s: String = s.chars().filter(|c| *c != ',').collect();

        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let (whole, fraction) = s.split_once('.').unwrap_or((s.as_str(), ""));
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
            || (whole.is_empty() && fraction.is_empty())
        {
            return Err(invalid());
        }

        let rupees: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        // Pad or truncate paise to 2 digits
        let paise: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction[..2].parse().map_err(|_| invalid())?,
        };

        let paise = rupees
            .checked_mul(100)
            .and_then(|p| p.checked_add(paise))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -paise } else { paise }))
    }

    /// Format with a currency symbol using Indian digit grouping
    /// (e.g. `₹1,23,456.50`)
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_indian(self.rupees().unsigned_abs()),
            self.paise_part()
        )
    }
}

/// Group digits the Indian way: last three, then pairs
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("₹"))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.paise_part() == 0 {
            serializer.serialize_i64(self.rupees())
        } else {
            serializer.serialize_f64(self.as_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() || (value * 100.0).abs() >= i64::MAX as f64 {
            return Err(serde::de::Error::custom("amount is out of range"));
        }
        Ok(Self::from_decimal(value))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
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
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let m = Money::from_paise(1050);
        assert_eq!(m.paise(), 1050);
        assert_eq!(m.rupees(), 10);
        assert_eq!(m.paise_part(), 50);
    }

    #[test]
    fn test_display_uses_indian_grouping() {
        assert_eq!(Money::from_rupees(12500).to_string(), "₹12,500.00");
        assert_eq!(Money::from_paise(12345650).to_string(), "₹1,23,456.50");
        assert_eq!(Money::from_rupees(450).to_string(), "₹450.00");
        assert_eq!(Money::from_paise(-1050).to_string(), "-₹10.50");
        assert_eq!(Money::from_rupees(10_000_000).to_string(), "₹1,00,00,000.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().paise(), 1050);
        assert_eq!(Money::parse("₹10.50").unwrap().paise(), 1050);
        assert_eq!(Money::parse("Rs. 1,250").unwrap().paise(), 125000);
        assert_eq!(Money::parse("-10.50").unwrap().paise(), -1050);
        assert_eq!(Money::parse("10").unwrap().paise(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().paise(), 1050);
        assert_eq!(Money::parse(".75").unwrap().paise(), 75);
        assert!(Money::parse("ten").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_repeated_sign() {
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("--1.5").is_err());
        assert!(Money::parse("-+5").is_err());
        assert!(Money::parse("+5").is_err());
        assert!(Money::parse("1.-5").is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(matches!(
            Money::parse("99999999999999999"),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(Money::parse("92233720368547758.08").is_err());
        assert_eq!(
            Money::parse("92233720368547758.07").unwrap(),
            Money::from_paise(i64::MAX)
        );
    }

    #[test]
    fn test_sum_saturates() {
        let amounts = [Money::from_paise(i64::MAX), Money::from_rupees(450)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_paise(i64::MAX));
    }

    #[test]
    fn test_average_over() {
        assert_eq!(Money::from_rupees(12500).average_over(1), Money::from_rupees(12500));
        assert_eq!(Money::from_rupees(100).average_over(3).paise(), 3333);
        assert_eq!(Money::from_rupees(100).average_over(0), Money::zero());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![Money::from_rupees(450), Money::from_rupees(3200)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_rupees(3650));
    }

    #[test]
    fn test_serialization_matches_document_format() {
        assert_eq!(serde_json::to_string(&Money::from_rupees(12500)).unwrap(), "12500");
        assert_eq!(serde_json::to_string(&Money::from_paise(123450)).unwrap(), "1234.5");

        let whole: Money = serde_json::from_str("450").unwrap();
        assert_eq!(whole, Money::from_rupees(450));
        let fractional: Money = serde_json::from_str("1234.5").unwrap();
        assert_eq!(fractional.paise(), 123450);

        assert!(serde_json::from_str::<Money>("1e300").is_err());
    }
}
