//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Quantity must be at least 1.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds the per-line maximum.
    #[error("quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Required checkout fields are empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Email address is not usable.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// Checkout step transition not allowed.
    #[error("invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition {
        from: &'static str,
        to: &'static str,
    },

    /// Checkout requires a non-empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Currency mismatch.
    #[error("currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch {
        expected: &'static str,
        got: &'static str,
    },

    /// Arithmetic overflow.
    #[error("arithmetic overflow in money calculation")]
    Overflow,
}
