//! Order types.

use crate::cart::{Cart, CartTotals, LineItemKey};
use crate::checkout::{ContactDetails, PaymentMethod};
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A finalized order, snapshotted from the cart and checkout at submission.
///
/// Immutable once built; the cart it came from is cleared after the order
/// backend confirms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Human-readable order number (e.g., "RL-9F2C41A0").
    pub order_number: String,
    /// Contact and delivery details.
    pub contact: ContactDetails,
    /// Selected payment method.
    pub payment_method: PaymentMethod,
    /// Items in the order.
    pub line_items: Vec<OrderLineItem>,
    /// Subtotal before delivery.
    pub subtotal: Money,
    /// Delivery fee charged.
    pub delivery_fee: Money,
    /// Total charged.
    pub grand_total: Money,
    /// Order currency.
    pub currency: Currency,
    /// Unix timestamp of placement.
    pub placed_at: i64,
}

impl Order {
    /// Build an order from the current cart and checkout state.
    ///
    /// Fails on an empty cart or if totals overflow.
    pub fn from_cart(
        cart: &Cart,
        contact: ContactDetails,
        payment_method: PaymentMethod,
    ) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let totals = CartTotals::for_cart(cart)?;
        let line_items = cart
            .items
            .iter()
            .map(|item| {
                Ok(OrderLineItem {
                    key: item.key.clone(),
                    name: item.product_name.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    line_total: item.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let id = OrderId::generate();
        let order_number = order_number_for(&id);

        Ok(Self {
            id,
            order_number,
            contact,
            payment_method,
            line_items,
            subtotal: totals.subtotal,
            delivery_fee: totals.delivery,
            grand_total: totals.total,
            currency: cart.currency,
            placed_at: current_timestamp(),
        })
    }

    /// Total item count.
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|i| i.quantity).sum()
    }

    /// Confirmation summary for this order.
    pub fn confirmation(&self) -> OrderConfirmation {
        OrderConfirmation {
            order_id: self.id.clone(),
            order_number: self.order_number.clone(),
            email: self.contact.email.clone(),
        }
    }
}

/// A line item frozen into an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineItem {
    /// Product, size, and colour ordered.
    pub key: LineItemKey,
    /// Product name at order time.
    pub name: String,
    /// Quantity ordered.
    pub quantity: i64,
    /// Unit price at order time.
    pub unit_price: Money,
    /// Total for this line.
    pub line_total: Money,
}

/// What the order backend returns on acceptance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfirmation {
    /// Accepted order id.
    pub order_id: OrderId,
    /// Human-readable order number.
    pub order_number: String,
    /// Email the confirmation was sent to.
    pub email: String,
}

/// Display order number: "RL-" plus the first id segment, uppercased.
fn order_number_for(id: &OrderId) -> String {
    let fragment: String = id
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(8)
        .collect();
    format!("RL-{}", fragment.to_uppercase())
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
