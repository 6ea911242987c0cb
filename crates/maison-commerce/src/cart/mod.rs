//! Shopping cart module.
//!
//! Contains the cart, its line items, derived totals, and the persisted
//! layout written to durable storage between sessions.

mod cart;
mod pricing;

pub use cart::{
    Cart, LineItem, LineItemKey, PersistedCart, PersistedLineItem, MAX_QUANTITY_PER_LINE,
};
pub use pricing::{
    delivery_fee, CartTotals, DELIVERY_FEE_MINOR, FREE_DELIVERY_THRESHOLD_MINOR,
};
