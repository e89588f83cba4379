//! Catalog store queries.

use crate::{db_err, PostgresStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pos_core::{
    CatalogStore, Category, CategoryId, Error, Money, NewProduct, Product, ProductId,
    ProductUpdate, Result,
};
use uuid::Uuid;

pub(crate) type ProductRow = (
    Uuid,
    String,
    i64,
    i64,
    String,
    Uuid,
    DateTime<Utc>,
    DateTime<Utc>,
);

const PRODUCT_COLUMNS: &str = "id, name, price, stock, unit, category_id, created_at, updated_at";

pub(crate) fn product_from_row(row: ProductRow) -> Product {
    let (id, name, price, stock, unit, category_id, created_at, updated_at) = row;
    // stock carries CHECK (stock >= 0)
    Product {
        id: ProductId::from_uuid(id),
        name,
        price: Money::from_minor(price),
        stock: u32::try_from(stock).unwrap_or_default(),
        unit,
        category_id: CategoryId::from_uuid(category_id),
        created_at,
        updated_at,
    }
}

#[async_trait]
impl CatalogStore for PostgresStore {
    async fn create_product(&self, new: NewProduct) -> Result<Product> {
        let id = ProductId::new();
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "INSERT INTO products (id, name, price, stock, unit, category_id)
             SELECT $1, $2, $3, $4, $5, c.id FROM categories c WHERE c.id = $6
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(&new.name)
        .bind(new.price.minor())
        .bind(i64::from(new.stock))
        .bind(&new.unit)
        .bind(new.category_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("failed to insert product", e))?;

        row.map(product_from_row)
            .ok_or_else(|| Error::not_found("Category", new.category_id))
    }

    async fn product(&self, id: ProductId) -> Result<Product> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("failed to fetch product", e))?;

        row.map(product_from_row)
            .ok_or_else(|| Error::not_found("Product", id))
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("failed to list products", e))?;

        Ok(rows.into_iter().map(product_from_row).collect())
    }

    async fn update_product(&self, id: ProductId, update: ProductUpdate) -> Result<Product> {
        if update.is_empty() {
            return self.product(id).await;
        }
        if let Some(category_id) = update.category_id {
            let exists: Option<(Uuid,)> =
                sqlx::query_as("SELECT id FROM categories WHERE id = $1")
                    .bind(category_id.as_uuid())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| db_err("failed to check category", e))?;
            if exists.is_none() {
                return Err(Error::not_found("Category", category_id));
            }
        }

        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "UPDATE products SET
                name        = COALESCE($2, name),
                price       = COALESCE($3, price),
                stock       = COALESCE($4, stock),
                unit        = COALESCE($5, unit),
                category_id = COALESCE($6, category_id),
                updated_at  = now()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(update.name)
        .bind(update.price.map(|p| p.minor()))
        .bind(update.stock.map(i64::from))
        .bind(update.unit)
        .bind(update.category_id.map(|c| *c.as_uuid()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("failed to update product", e))?;

        row.map(product_from_row)
            .ok_or_else(|| Error::not_found("Product", id))
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("failed to delete product", e))?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Product", id));
        }
        Ok(())
    }

    async fn create_category(&self, name: String) -> Result<Category> {
        let id = CategoryId::new();
        sqlx::query("INSERT INTO categories (id, name) VALUES ($1, $2)")
            .bind(id.as_uuid())
            .bind(&name)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("failed to insert category", e))?;
        Ok(Category { id, name })
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows: Vec<(Uuid, String)> =
            sqlx::query_as("SELECT id, name FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_err("failed to list categories", e))?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Category {
                id: CategoryId::from_uuid(id),
                name,
            })
            .collect())
    }
}
