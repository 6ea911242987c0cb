//! Storefront domain types and logic for Maison.
//!
//! This crate holds the pure, I/O-free core of the storefront:
//!
//! - **Catalog**: products and categories as served by the catalog backend
//! - **Cart**: line items keyed by (product, size, colour), with derived totals
//! - **Checkout**: contact details, payment methods, and finalized orders
//!
//! Stateful concerns (persistence, subscriptions, the checkout state machine
//! and its ports) live in `maison-session`.
//!
//! # Example
//!
//! ```rust
//! use maison_commerce::prelude::*;
//!
//! let mut shirt = Product::new("linen-shirt", "Linen Shirt", Money::from_major(120, Currency::GBP));
//! shirt.sizes = vec!["S".into(), "M".into(), "L".into()];
//! shirt.colors = vec!["White".into()];
//!
//! let mut cart = Cart::new(Currency::GBP);
//! cart.add_item(&shirt, 2, "M", "White").unwrap();
//!
//! let totals = CartTotals::for_cart(&cart).unwrap();
//! assert_eq!(totals.total.to_string(), "\u{a3}289.00"); // £240 + £49 delivery
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, Product};

    // Cart
    pub use crate::cart::{
        Cart, CartTotals, LineItem, LineItemKey, PersistedCart, PersistedLineItem,
        DELIVERY_FEE_MINOR, FREE_DELIVERY_THRESHOLD_MINOR, MAX_QUANTITY_PER_LINE,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutStep, ContactDetails, Order, OrderConfirmation, OrderLineItem, PaymentMethod,
    };
}
