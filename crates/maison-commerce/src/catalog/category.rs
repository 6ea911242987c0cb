//! Category types for the storefront landing grid.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A shop-by-category entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
    /// Category image URL.
    pub image_url: Option<String>,
    /// Number of products in this category.
    pub product_count: i64,
}

impl Category {
    /// Create a new category.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: CategoryId::generate(),
            name: name.into(),
            slug: slug.into(),
            image_url: None,
            product_count: 0,
        }
    }
}
