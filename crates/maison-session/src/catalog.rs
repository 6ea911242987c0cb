//! Catalog client port.

use async_trait::async_trait;
use maison_commerce::catalog::{Category, Product};
use maison_commerce::ProductId;
use std::collections::HashMap;

/// Catalog operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    /// Backend unreachable or returned garbage.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to the product catalog.
///
/// Freshness is best-effort: the cart snapshots what it needs at add time and
/// only comes back here when rehydrating a persisted cart.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch the shop-by-category listing.
    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// Fetch the products of one category by its slug.
    async fn fetch_products_by_slug(
        &self,
        category_slug: &str,
    ) -> Result<Vec<Product>, CatalogError>;

    /// Resolve a single product. `None` if it no longer exists.
    async fn fetch_product(&self, id: &ProductId) -> Result<Option<Product>, CatalogError>;
}

/// Fixed in-memory catalog for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    categories: Vec<Category>,
    products: HashMap<String, Vec<Product>>,
}

impl StaticCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category to the listing.
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Add a product under a category slug.
    pub fn with_product(mut self, category_slug: impl Into<String>, product: Product) -> Self {
        self.products
            .entry(category_slug.into())
            .or_default()
            .push(product);
        self
    }
}

#[async_trait]
impl CatalogClient for StaticCatalog {
    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.clone())
    }

    async fn fetch_products_by_slug(
        &self,
        category_slug: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .products
            .get(category_slug)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_product(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self
            .products
            .values()
            .flatten()
            .find(|p| &p.id == id)
            .cloned())
    }
}
