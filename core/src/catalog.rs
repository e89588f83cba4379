//! Catalog entities and the store contract for products and categories.
//!
//! Plain reference data: no derived logic beyond non-negative price/stock,
//! which the request layer validates before anything reaches a store.

use crate::error::Result;
use crate::types::{CategoryId, Money, ProductId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product category. Pure reference data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier
    pub id: CategoryId,
    /// Display name
    pub name: String,
}

/// A sellable product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Unit price in minor currency units (non-negative)
    pub price: Money,
    /// Units currently in stock
    pub stock: u32,
    /// Unit label shown on the till ("pcs", "cup", ...)
    pub unit: String,
    /// Owning category
    pub category_id: CategoryId,
    /// When the product was created
    pub created_at: DateTime<Utc>,
    /// When the product was last modified
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a product.
#[derive(Clone, Debug, Deserialize)]
pub struct NewProduct {
    /// Display name
    pub name: String,
    /// Unit price in minor currency units
    pub price: Money,
    /// Initial stock level
    pub stock: u32,
    /// Unit label
    pub unit: String,
    /// Owning category
    pub category_id: CategoryId,
}

/// Partial update of a product; `None` fields are left unchanged.
///
/// Stock edits through this path are catalog corrections (recounts,
/// restocking). Sales go through the order workflow only.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProductUpdate {
    /// New display name
    pub name: Option<String>,
    /// New unit price
    pub price: Option<Money>,
    /// New stock level
    pub stock: Option<u32>,
    /// New unit label
    pub unit: Option<String>,
    /// New owning category
    pub category_id: Option<CategoryId>,
}

impl ProductUpdate {
    /// Whether the update carries no changes at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.unit.is_none()
            && self.category_id.is_none()
    }
}

/// Read/write access to the product and category catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the category does not exist and
    /// [`crate::Error::Storage`] on backend failure.
    async fn create_product(&self, new: NewProduct) -> Result<Product>;

    /// Fetch one product by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if absent.
    async fn product(&self, id: ProductId) -> Result<Product>;

    /// List the whole catalog, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] on backend failure.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Apply a partial update and return the updated product.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if absent.
    async fn update_product(&self, id: ProductId, update: ProductUpdate) -> Result<Product>;

    /// Delete a product. Past transactions keep their frozen snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if absent.
    async fn delete_product(&self, id: ProductId) -> Result<()>;

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] on backend failure.
    async fn create_category(&self, name: String) -> Result<Category>;

    /// List all categories by name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] on backend failure.
    async fn list_categories(&self) -> Result<Vec<Category>>;
}
