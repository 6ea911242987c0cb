//! Cart totals and the delivery-fee rule.

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Subtotal (in minor units) at or above which delivery is free: £500.00.
pub const FREE_DELIVERY_THRESHOLD_MINOR: i64 = 50_000;

/// Flat delivery fee (in minor units) below the threshold: £49.00.
pub const DELIVERY_FEE_MINOR: i64 = 4_900;

/// Delivery fee for a given subtotal.
///
/// A step function: zero at or above the free-delivery threshold, the flat
/// fee below it.
pub fn delivery_fee(subtotal: Money) -> Money {
    if subtotal.minor >= FREE_DELIVERY_THRESHOLD_MINOR {
        Money::zero(subtotal.currency)
    } else {
        Money::new(DELIVERY_FEE_MINOR, subtotal.currency)
    }
}

/// Derived totals for a cart. Never stored; recomputed from cart state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of unit price x quantity across line items.
    pub subtotal: Money,
    /// Delivery fee under the threshold rule.
    pub delivery: Money,
    /// Subtotal plus delivery.
    pub total: Money,
}

impl CartTotals {
    /// Compute totals for a cart.
    pub fn for_cart(cart: &Cart) -> Result<Self, CommerceError> {
        let subtotal = cart.subtotal()?;
        let delivery = delivery_fee(subtotal);
        let total = subtotal
            .try_add(&delivery)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            subtotal,
            delivery,
            total,
        })
    }

    /// Check if delivery is free at this subtotal.
    pub fn has_free_delivery(&self) -> bool {
        self.delivery.is_zero()
    }

    /// How much more to spend for free delivery, if not already reached.
    pub fn remaining_for_free_delivery(&self) -> Option<Money> {
        if self.subtotal.minor >= FREE_DELIVERY_THRESHOLD_MINOR {
            None
        } else {
            Some(Money::new(
                FREE_DELIVERY_THRESHOLD_MINOR - self.subtotal.minor,
                self.subtotal.currency,
            ))
        }
    }
}
