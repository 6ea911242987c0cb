//! Payment method types.

use serde::{Deserialize, Serialize};

/// Payment method offered at the payment step.
///
/// Selection only; charging is the order backend's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Credit or debit card.
    #[default]
    Card,
    /// PayPal.
    PayPal,
    /// Cash on delivery.
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::PayPal => "paypal",
            PaymentMethod::CashOnDelivery => "cod",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit / Debit Card",
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// Subtitle copy shown under the method name.
    pub fn description(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Visa, Mastercard, American Express",
            PaymentMethod::PayPal => "Pay securely with PayPal. Pay in 3 available.",
            PaymentMethod::CashOnDelivery => "Pay when your order arrives",
        }
    }

    /// Parse the wire form produced by [`Self::as_str`].
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "card" => Some(PaymentMethod::Card),
            "paypal" => Some(PaymentMethod::PayPal),
            "cod" => Some(PaymentMethod::CashOnDelivery),
            _ => None,
        }
    }
}
