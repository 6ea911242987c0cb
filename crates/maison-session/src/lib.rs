//! Session-scoped state for the Maison storefront.
//!
//! One session owns one [`CartStore`] and, once checkout begins, one
//! [`Checkout`]. The store holds the cart in memory, writes it through to a
//! [`CartStorage`] backend on every mutation, and notifies subscribers so a
//! presentation layer can re-render without owning any state itself. The
//! checkout drives a three-step state machine over the store and hands the
//! finalized order to an [`OrderSubmitter`].
//!
//! # Example
//!
//! ```rust,ignore
//! use maison_commerce::prelude::*;
//! use maison_session::{CartStore, Checkout, MemoryStorage};
//!
//! let mut store = CartStore::new(SessionId::generate(), Box::new(MemoryStorage::default()));
//! store.add_item(&product, 1, "M", "White")?;
//!
//! let mut checkout = Checkout::begin(&store)?;
//! checkout.submit_information(details)?;
//! checkout.select_payment_method(PaymentMethod::Card);
//! let confirmation = checkout.place_order(&mut store, &gateway).await?;
//! assert!(store.is_empty());
//! ```

pub mod catalog;
pub mod cart_store;
pub mod error;
pub mod orchestrator;
pub mod storage;
pub mod submit;

pub use catalog::{CatalogClient, CatalogError, StaticCatalog};
pub use cart_store::{CartStore, SubscriptionId};
pub use error::SessionError;
pub use orchestrator::Checkout;
pub use storage::{CartStorage, MemoryStorage, StorageError};
pub use submit::{OrderSubmitter, SubmissionError, DEFAULT_SUBMIT_TIMEOUT};
