//! Money type for representing monetary values.
//!
//! Uses minor-unit integer representation (pence for GBP) to avoid
//! floating-point precision issues in monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
///
/// The storefront trades in a single currency per session; the tag exists so
/// that mixing amounts from different currencies is an error rather than a
/// silently wrong number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    GBP,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "GBP").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::GBP => "GBP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "£").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::GBP => "\u{a3}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "GBP" => Some(Currency::GBP),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (pence, cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in minor units (e.g., pence).
    pub minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(minor: i64, currency: Currency) -> Self {
        Self { minor, currency }
    }

    /// Create a Money value from whole major units (e.g., pounds).
    ///
    /// ```
    /// use maison_commerce::money::{Currency, Money};
    /// assert_eq!(Money::from_major(49, Currency::GBP).minor, 4900);
    /// ```
    pub fn from_major(major: i64, currency: Currency) -> Self {
        Self::new(major * 100, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.minor == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.minor > 0
    }

    /// Convert to a decimal value for display math.
    pub fn to_decimal(&self) -> f64 {
        self.minor as f64 / 100.0
    }

    /// Format as a display string (e.g., "£49.99").
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.to_decimal())
    }

    /// Format without the currency symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.to_decimal())
    }

    /// Add another value, returning `None` on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let minor = self.minor.checked_add(other.minor)?;
        Some(Money::new(minor, self.currency))
    }

    /// Subtract another value, returning `None` on currency mismatch or overflow.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let minor = self.minor.checked_sub(other.minor)?;
        Some(Money::new(minor, self.currency))
    }

    /// Multiply by a scalar, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let minor = self.minor.checked_mul(factor)?;
        Some(Money::new(minor, self.currency))
    }

    /// Sum an iterator of values, returning `None` on mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
