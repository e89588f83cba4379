//! Category endpoints. Every route requires a bearer token.
//!
//! - POST /api/categories - Create a category
//! - GET /api/categories - List categories by name

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use pos_core::{Category, Error};
use serde::Deserialize;

/// Request to create a new category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Display name
    pub name: String,
}

/// Create a new category.
pub async fn create_category(
    _user: CurrentUser,
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    if request.name.trim().is_empty() {
        return Err(Error::validation("name must not be empty").into());
    }
    let category = state.catalog.create_category(request.name).await?;
    tracing::info!(category_id = %category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// List all categories by name.
pub async fn list_categories(
    _user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = state.catalog.list_categories().await?;
    Ok(Json(categories))
}
