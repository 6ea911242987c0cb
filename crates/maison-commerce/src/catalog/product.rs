//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product as served by the catalog backend.
///
/// The cart holds a snapshot of the fields it needs at add time; it never
/// writes back to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Original price before markdown, for discount display.
    pub original_price: Option<Money>,
    /// Image URLs, display order preserved.
    pub images: Vec<String>,
    /// Available sizes.
    pub sizes: Vec<String>,
    /// Available colours.
    pub colors: Vec<String>,
    /// Average review rating, 0.0 to 5.0.
    pub rating: f64,
    /// Number of reviews behind the rating.
    pub review_count: i64,
    /// Shown with a bestseller badge.
    pub is_bestseller: bool,
    /// Shown with a new-arrival badge.
    pub is_new: bool,
}

impl Product {
    /// Create a new product with generated id and empty display data.
    pub fn new(slug: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: ProductId::generate(),
            slug: slug.into(),
            name: name.into(),
            price,
            original_price: None,
            images: Vec::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
            rating: 0.0,
            review_count: 0,
            is_bestseller: false,
            is_new: false,
        }
    }

    /// Check if the product is marked down from an original price.
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .map(|orig| orig.minor > self.price.minor)
            .unwrap_or(false)
    }

    /// Amount saved versus the original price, for the "Save £X" badge.
    pub fn savings(&self) -> Option<Money> {
        self.original_price.and_then(|orig| {
            if orig.minor > self.price.minor {
                orig.try_subtract(&self.price)
            } else {
                None
            }
        })
    }

    /// Discount percentage versus the original price, if on sale.
    pub fn discount_percentage(&self) -> Option<f64> {
        self.original_price.and_then(|orig| {
            if orig.minor > self.price.minor {
                let saved = orig.minor - self.price.minor;
                Some((saved as f64 / orig.minor as f64) * 100.0)
            } else {
                None
            }
        })
    }

    /// First image, used on cards and cart rows.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Filled-star count for the rating row, clamped to 0..=5.
    pub fn stars(&self) -> u8 {
        (self.rating.floor() as i64).clamp(0, 5) as u8
    }

    /// Default size for quick-add (first listed).
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(String::as_str)
    }

    /// Default colour for quick-add (first listed).
    pub fn default_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }
}
