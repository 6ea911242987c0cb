//! Cart and line item types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_LINE: i64 = 99;

/// The composite identity of a cart entry.
///
/// Two adds with the same product, size, and colour merge into one line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItemKey {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Selected size.
    pub size: String,
    /// Selected colour.
    pub color: String,
}

impl LineItemKey {
    /// Create a new key.
    pub fn new(
        product_id: ProductId,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id,
            size: size.into(),
            color: color.into(),
        }
    }
}

/// A line item in the cart.
///
/// Name, image, and unit price are snapshotted at add time; a catalog price
/// change mid-session does not move the subtotal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Composite identity: (product, size, colour).
    pub key: LineItemKey,
    /// Quantity, always >= 1 while stored.
    pub quantity: i64,
    /// Unit price at add time.
    pub unit_price: Money,
    /// Product name at add time.
    pub product_name: String,
    /// Primary product image at add time.
    pub image: Option<String>,
}

impl LineItem {
    /// Create a line item by snapshotting a product.
    pub fn new(
        product: &Product,
        quantity: i64,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            key: LineItemKey::new(product.id.clone(), size, color),
            quantity,
            unit_price: product.price,
            product_name: product.name.clone(),
            image: product.primary_image().map(str::to_string),
        }
    }

    /// Total for this line (unit price x quantity).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// A shopping cart.
///
/// Line items are kept in insertion order for display and are unique by
/// [`LineItemKey`]. Entries never store a quantity below 1; updating a
/// quantity to zero removes the entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Items in the cart, insertion order preserved.
    pub items: Vec<LineItem>,
    /// Cart currency.
    pub currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Add an item to the cart.
    ///
    /// Returns an error if:
    /// - quantity is below 1
    /// - the resulting line quantity would exceed [`MAX_QUANTITY_PER_LINE`]
    /// - the product is priced in a different currency than the cart
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: i64,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<(), CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if product.price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code(),
                got: product.price.currency.code(),
            });
        }

        let key = LineItemKey::new(product.id.clone(), size, color);

        if let Some(existing) = self.items.iter_mut().find(|i| i.key == key) {
            let merged = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            if merged > MAX_QUANTITY_PER_LINE {
                return Err(CommerceError::QuantityExceedsLimit(
                    merged,
                    MAX_QUANTITY_PER_LINE,
                ));
            }
            existing.quantity = merged;
            return Ok(());
        }

        if quantity > MAX_QUANTITY_PER_LINE {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_LINE,
            ));
        }

        self.items
            .push(LineItem::new(product, quantity, key.size, key.color));
        self.debug_assert_unique_keys();
        Ok(())
    }

    /// Update a line item's quantity in place.
    ///
    /// A quantity of zero or below removes the item. Returns `Ok(false)` if
    /// the key is not in the cart (absent keys are a no-op, not an error).
    pub fn update_quantity(
        &mut self,
        key: &LineItemKey,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(key));
        }
        if quantity > MAX_QUANTITY_PER_LINE {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_LINE,
            ));
        }

        if let Some(item) = self.items.iter_mut().find(|i| &i.key == key) {
            item.quantity = quantity;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Remove a line item. Returns `false` if the key was absent.
    pub fn remove_item(&mut self, key: &LineItemKey) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.key != key);
        self.items.len() < len_before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of unit price x quantity across all line items.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.items
            .iter()
            .try_fold(Money::zero(self.currency), |acc, item| {
                acc.try_add(&item.line_total()?)
                    .ok_or(CommerceError::Overflow)
            })
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct line items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line item by key.
    pub fn get_item(&self, key: &LineItemKey) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.key == key)
    }

    /// Convert to the persisted layout.
    ///
    /// Prices and names are intentionally not persisted; they are re-resolved
    /// from the catalog on load.
    pub fn to_persisted(&self) -> PersistedCart {
        PersistedCart {
            items: self
                .items
                .iter()
                .map(|i| PersistedLineItem {
                    product_id: i.key.product_id.clone(),
                    size: i.key.size.clone(),
                    color: i.key.color.clone(),
                    quantity: i.quantity,
                })
                .collect(),
        }
    }

    // Duplicate keys cannot arise while add_item/update_quantity are the only
    // mutators; this trips in debug builds if that ever stops holding.
    fn debug_assert_unique_keys(&self) {
        #[cfg(debug_assertions)]
        {
            for (n, item) in self.items.iter().enumerate() {
                debug_assert!(
                    !self.items[n + 1..].iter().any(|other| other.key == item.key),
                    "duplicate line item key in cart"
                );
            }
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::GBP)
    }
}

/// Durable cart layout: one record per line item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersistedCart {
    /// Persisted entries, insertion order preserved.
    pub items: Vec<PersistedLineItem>,
}

impl PersistedCart {
    /// Check if there is nothing to restore.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One persisted cart entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedLineItem {
    /// Product to re-resolve from the catalog on load.
    pub product_id: ProductId,
    /// Selected size.
    pub size: String,
    /// Selected colour.
    pub color: String,
    /// Quantity.
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(slug: &str, minor: i64) -> Product {
        let mut p = Product::new(slug, slug.to_uppercase(), Money::new(minor, Currency::GBP));
        p.sizes = vec!["M".into()];
        p.colors = vec!["White".into()];
        p
    }

    #[test]
    fn test_cart_starts_empty() {
        let cart = Cart::new(Currency::GBP);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal().unwrap().minor, 0);
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new(Currency::GBP);
        let p = product("throw", 4500);
        cart.add_item(&p, 2, "M", "White").unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.subtotal().unwrap().minor, 9000);
    }

    #[test]
    fn test_add_same_key_merges() {
        let mut cart = Cart::new(Currency::GBP);
        let p = product("throw", 4500);

        cart.add_item(&p, 1, "M", "White").unwrap();
        cart.add_item(&p, 2, "M", "White").unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_different_size_is_a_new_line() {
        let mut cart = Cart::new(Currency::GBP);
        let p = product("throw", 4500);

        cart.add_item(&p, 1, "M", "White").unwrap();
        cart.add_item(&p, 1, "L", "White").unwrap();

        assert_eq!(cart.unique_item_count(), 2);
    }

    #[test]
    fn test_merge_property_sum_of_quantities() {
        let mut cart = Cart::new(Currency::GBP);
        let p = product("throw", 4500);
        for qty in [1, 2, 3, 5] {
            cart.add_item(&p, qty, "M", "White").unwrap();
        }
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 11);
    }

    #[test]
    fn test_snapshot_price_survives_catalog_change() {
        let mut cart = Cart::new(Currency::GBP);
        let mut p = product("throw", 4500);
        cart.add_item(&p, 1, "M", "White").unwrap();

        p.price = Money::new(9900, Currency::GBP);
        cart.add_item(&p, 1, "M", "White").unwrap();

        // Merged line keeps the add-time snapshot.
        assert_eq!(cart.subtotal().unwrap().minor, 9000);
    }

    #[test]
    fn test_update_quantity_in_place() {
        let mut cart = Cart::new(Currency::GBP);
        let a = product("throw", 4500);
        let b = product("cushion", 2500);
        cart.add_item(&a, 1, "M", "White").unwrap();
        cart.add_item(&b, 1, "M", "White").unwrap();

        let key = LineItemKey::new(a.id.clone(), "M", "White");
        assert!(cart.update_quantity(&key, 5).unwrap());

        // Position unchanged, quantity replaced.
        assert_eq!(cart.items[0].key, key);
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = Cart::new(Currency::GBP);
        let p = product("throw", 4500);
        cart.add_item(&p, 3, "M", "White").unwrap();

        let key = LineItemKey::new(p.id.clone(), "M", "White");
        assert!(cart.update_quantity(&key, 0).unwrap());
        assert!(cart.is_empty());

        // Same as remove_item for any existing key.
        cart.add_item(&p, 3, "M", "White").unwrap();
        assert!(cart.remove_item(&key));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_absent_key_is_noop() {
        let mut cart = Cart::new(Currency::GBP);
        let key = LineItemKey::new(ProductId::new("ghost"), "M", "White");
        assert!(!cart.update_quantity(&key, 2).unwrap());
        assert!(!cart.remove_item(&key));
    }

    #[test]
    fn test_invalid_quantity_rejected() {
        let mut cart = Cart::new(Currency::GBP);
        let p = product("throw", 4500);
        assert!(matches!(
            cart.add_item(&p, 0, "M", "White"),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert!(matches!(
            cart.add_item(&p, -2, "M", "White"),
            Err(CommerceError::InvalidQuantity(-2))
        ));
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::new(Currency::GBP);
        let p = product("throw", 4500);
        cart.add_item(&p, MAX_QUANTITY_PER_LINE, "M", "White").unwrap();
        assert!(cart.add_item(&p, 1, "M", "White").is_err());
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let mut cart = Cart::new(Currency::GBP);
        let p = Product::new("import", "Import", Money::new(100, Currency::USD));
        assert!(matches!(
            cart.add_item(&p, 1, "M", "White"),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_subtotal_under_interleaving() {
        let mut cart = Cart::new(Currency::GBP);
        let a = product("throw", 12000);
        let b = product("cushion", 2500);
        let key_a = LineItemKey::new(a.id.clone(), "M", "White");

        cart.add_item(&a, 1, "M", "White").unwrap();
        cart.add_item(&b, 2, "M", "White").unwrap();
        cart.update_quantity(&key_a, 3).unwrap();
        cart.remove_item(&LineItemKey::new(b.id.clone(), "M", "White"));

        let expected: i64 = cart
            .items
            .iter()
            .map(|i| i.unit_price.minor * i.quantity)
            .sum();
        assert_eq!(cart.subtotal().unwrap().minor, expected);
        assert_eq!(expected, 36000);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new(Currency::GBP);
        let p = product("throw", 4500);
        cart.add_item(&p, 2, "M", "White").unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_persisted_layout() {
        let mut cart = Cart::new(Currency::GBP);
        let p = product("throw", 4500);
        cart.add_item(&p, 2, "M", "White").unwrap();

        let persisted = cart.to_persisted();
        assert_eq!(persisted.items.len(), 1);
        assert_eq!(persisted.items[0].quantity, 2);

        // Price and name are not part of the durable layout.
        let json = serde_json::to_value(&persisted).unwrap();
        let entry = &json["items"][0];
        assert!(entry.get("unit_price").is_none());
        assert!(entry.get("product_name").is_none());
        assert_eq!(entry["size"], "M");
        assert_eq!(entry["color"], "White");
    }
}
