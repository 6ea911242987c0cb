//! The session's cart store.

use maison_commerce::cart::{Cart, CartTotals, LineItem, LineItemKey};
use maison_commerce::catalog::Product;
use maison_commerce::{CommerceError, Currency, Money, SessionId};
use tracing::{debug, warn};

use crate::catalog::CatalogClient;
use crate::error::SessionError;
use crate::storage::CartStorage;

/// Handle returned by [`CartStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&Cart) + Send>;

/// Owns one session's cart.
///
/// All mutations are synchronous: they update the in-memory cart, schedule a
/// write-through save of the persisted layout, and notify subscribers.
/// Readers always observe the in-memory state; a failed save is logged and
/// never blocks or fails the mutation.
pub struct CartStore {
    session_id: SessionId,
    cart: Cart,
    storage: Box<dyn CartStorage>,
    subscribers: Vec<(u64, Subscriber)>,
    next_subscription: u64,
}

impl CartStore {
    /// Create a store with an empty cart.
    pub fn new(session_id: SessionId, storage: Box<dyn CartStorage>) -> Self {
        Self {
            session_id,
            cart: Cart::new(Currency::GBP),
            storage,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Rehydrate the cart from storage.
    ///
    /// Each persisted entry is re-resolved against the catalog; entries whose
    /// product no longer exists (or can no longer be re-added) are dropped
    /// and the pruned cart is written back. Returns how many entries were
    /// dropped. Intended for a freshly created store at session start.
    pub async fn load(&mut self, catalog: &dyn CatalogClient) -> Result<usize, SessionError> {
        let Some(persisted) = self.storage.load()? else {
            return Ok(0);
        };

        let mut dropped = 0usize;
        for entry in persisted.items {
            match catalog.fetch_product(&entry.product_id).await? {
                Some(product) => {
                    if let Err(e) =
                        self.cart
                            .add_item(&product, entry.quantity, entry.size, entry.color)
                    {
                        warn!(session = %self.session_id, product = %product.id, error = %e,
                            "dropping unrestorable cart entry");
                        dropped += 1;
                    }
                }
                None => {
                    debug!(session = %self.session_id, product = %entry.product_id,
                        "dropping cart entry for vanished product");
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            self.persist();
        }
        self.notify();
        Ok(dropped)
    }

    /// Add an item, merging with an existing line of the same key.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: i64,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<(), CommerceError> {
        self.cart.add_item(product, quantity, size, color)?;
        debug!(session = %self.session_id, product = %product.id, quantity, "cart item added");
        self.persist();
        self.notify();
        Ok(())
    }

    /// Update a line's quantity; zero or below removes it.
    ///
    /// Returns `Ok(false)` without side effects if the key is absent.
    pub fn update_quantity(
        &mut self,
        key: &LineItemKey,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        let changed = self.cart.update_quantity(key, quantity)?;
        if changed {
            self.persist();
            self.notify();
        }
        Ok(changed)
    }

    /// Remove a line. Returns `false` without side effects if absent.
    pub fn remove_item(&mut self, key: &LineItemKey) -> bool {
        let removed = self.cart.remove_item(key);
        if removed {
            self.persist();
            self.notify();
        }
        removed
    }

    /// Empty the cart and its durable record.
    ///
    /// Called by the checkout after a confirmed order; also available to the
    /// presentation layer directly.
    pub fn clear(&mut self) {
        self.cart.clear();
        if let Err(e) = self.storage.clear() {
            warn!(session = %self.session_id, error = %e, "failed to clear persisted cart");
        }
        self.notify();
    }

    /// Sum of unit price x quantity across line items.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.cart.subtotal()
    }

    /// Subtotal, delivery fee, and total under the threshold rule.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        CartTotals::for_cart(&self.cart)
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    /// Number of distinct line items.
    pub fn unique_item_count(&self) -> usize {
        self.cart.unique_item_count()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.cart.items
    }

    /// The underlying cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The session this store belongs to.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Register a callback invoked after every cart change.
    pub fn subscribe(&mut self, callback: impl Fn(&Cart) + Send + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        SubscriptionId(id)
    }

    /// Remove a subscriber. Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id.0);
        self.subscribers.len() < len_before
    }

    // Write-through save of the persisted layout. Failures are logged, not
    // surfaced: readers observe the in-memory cart regardless.
    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.cart.to_persisted()) {
            warn!(session = %self.session_id, error = %e, "failed to persist cart");
        }
    }

    fn notify(&self) {
        for (_, callback) in &self.subscribers {
            callback(&self.cart);
        }
    }
}
