//! Dashboard and recommendation endpoints. Every route requires a bearer
//! token.
//!
//! - GET /api/dashboard - Today's revenue and count plus all-time bestsellers
//! - GET /api/recommendations - Bestsellers resolved to live products
//!
//! Figures come from the frozen line-item snapshots, so they stay correct
//! after catalog renames and deletions.

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
};
use pos_core::{DashboardSummary, Product};
use serde::Deserialize;

const DEFAULT_TOP_PRODUCTS: usize = 5;
const MAX_LIMIT: usize = 50;

/// Query parameters for the dashboard summary.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// How many bestsellers to include (default 5, capped at 50)
    pub top: Option<usize>,
}

/// Query parameters for recommendations.
#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    /// How many products to return (default 5, capped at 50)
    pub limit: Option<usize>,
}

fn clamp_limit(requested: Option<usize>) -> usize {
    requested.unwrap_or(DEFAULT_TOP_PRODUCTS).min(MAX_LIMIT)
}

/// Today's sales figures plus the all-time top products.
///
/// "Today" is the current UTC date on the server clock.
pub async fn get_dashboard(
    _user: CurrentUser,
    Query(query): Query<DashboardQuery>,
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    let today = state.clock.now().date_naive();
    let summary = state
        .dashboard
        .summary(today, clamp_limit(query.top))
        .await?;
    Ok(Json(summary))
}

/// Best-selling products resolved to the live catalog, falling back to the
/// newest products when nothing has sold yet.
pub async fn get_recommendations(
    _user: CurrentUser,
    Query(query): Query<RecommendationsQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state
        .dashboard
        .recommendations(clamp_limit(query.limit))
        .await?;
    Ok(Json(products))
}
