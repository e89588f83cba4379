//! Authentication extractors for the POS API.
//!
//! The API is consumed by trusted till devices: each request carries the
//! cashier's user id as `Authorization: Bearer <uuid>`. The extractor only
//! establishes identity; ownership checks live in the transaction store.
//!
//! # Usage
//!
//! ```rust,ignore
//! async fn list_transactions(
//!     user: CurrentUser,
//!     State(state): State<AppState>,
//! ) -> Result<Json<Vec<Transaction>>, AppError> {
//!     let own = state.transactions.transactions_for(user.0).await?;
//!     Ok(Json(own))
//! }
//! ```

use crate::error::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use pos_core::UserId;

/// Bearer token extracted from `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| {
                AppError::unauthorized("Invalid authorization format. Expected 'Bearer <token>'")
            })?
            .to_string();

        if token.is_empty() {
            return Err(AppError::unauthorized("Empty bearer token"));
        }

        Ok(Self(token))
    }
}

/// Authenticated user.
///
/// Use this as a handler parameter to require authentication.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let bearer = BearerToken::from_request_parts(parts, state).await?;

        let uuid = uuid::Uuid::parse_str(&bearer.0)
            .map_err(|_| AppError::unauthorized("Invalid bearer token format"))?;

        Ok(Self(UserId::from_uuid(uuid)))
    }
}
