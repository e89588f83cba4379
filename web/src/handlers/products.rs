//! Product catalog endpoints. Every route requires a bearer token.
//!
//! - POST /api/products - Create a product
//! - GET /api/products - List the catalog, newest first
//! - GET /api/products/:id - Get one product
//! - PUT /api/products/:id - Partial update
//! - DELETE /api/products/:id - Delete

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::metrics::record_product_created;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use pos_core::{CategoryId, Error, Money, NewProduct, Product, ProductId, ProductUpdate};
use serde::Deserialize;
use uuid::Uuid;

/// Request to create a new product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Display name
    pub name: String,
    /// Unit price in minor currency units
    pub price: Money,
    /// Initial stock level
    pub stock: u32,
    /// Unit label ("pcs", "cup", ...)
    pub unit: String,
    /// Owning category
    pub category_id: CategoryId,
}

/// Request to update a product. Omitted fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    /// New display name
    pub name: Option<String>,
    /// New unit price
    pub price: Option<Money>,
    /// New stock level (catalog correction, not a sale)
    pub stock: Option<u32>,
    /// New unit label
    pub unit: Option<String>,
    /// New owning category
    pub category_id: Option<CategoryId>,
}

fn check_name(name: &str) -> Result<(), Error> {
    if name.trim().is_empty() {
        return Err(Error::validation("name must not be empty"));
    }
    Ok(())
}

fn check_price(price: Money) -> Result<(), Error> {
    if price.is_negative() {
        return Err(Error::validation("price must not be negative"));
    }
    Ok(())
}

fn check_unit(unit: &str) -> Result<(), Error> {
    if unit.trim().is_empty() {
        return Err(Error::validation("unit must not be empty"));
    }
    Ok(())
}

/// Create a new product.
pub async fn create_product(
    _user: CurrentUser,
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    check_name(&request.name)?;
    check_price(request.price)?;
    check_unit(&request.unit)?;

    let product = state
        .catalog
        .create_product(NewProduct {
            name: request.name,
            price: request.price,
            stock: request.stock,
            unit: request.unit,
            category_id: request.category_id,
        })
        .await?;

    record_product_created();
    tracing::info!(product_id = %product.id, name = %product.name, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// List the whole catalog, newest first.
pub async fn list_products(
    _user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.catalog.list_products().await?;
    Ok(Json(products))
}

/// Get one product by id.
pub async fn get_product(
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Product>, AppError> {
    let product = state.catalog.product(ProductId::from_uuid(id)).await?;
    Ok(Json(product))
}

/// Apply a partial update.
pub async fn update_product(
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<Product>, AppError> {
    if let Some(name) = &request.name {
        check_name(name)?;
    }
    if let Some(price) = request.price {
        check_price(price)?;
    }
    if let Some(unit) = &request.unit {
        check_unit(unit)?;
    }

    let product = state
        .catalog
        .update_product(
            ProductId::from_uuid(id),
            ProductUpdate {
                name: request.name,
                price: request.price,
                stock: request.stock,
                unit: request.unit,
                category_id: request.category_id,
            },
        )
        .await?;
    Ok(Json(product))
}

/// Delete a product. Past transactions keep their frozen snapshots.
pub async fn delete_product(
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.catalog.delete_product(ProductId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
