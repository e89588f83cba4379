//! Order submission and transaction reads.
//!
//! - POST /api/transactions - Run the order workflow (requires auth)
//! - GET /api/transactions - List the caller's transactions, newest first
//! - GET /api/transactions/:id - Get one transaction (owner only)
//!
//! The order workflow is the store's atomic unit of work: stock for every
//! line is checked and decremented together, and a failure on any line
//! leaves no decrement behind.

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::metrics::{record_order_placed, record_order_rejected};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use pos_core::{Error, Money, OrderDraft, Transaction, TransactionId};
use serde::Serialize;
use uuid::Uuid;

/// Response after recording an order.
#[derive(Debug, Serialize)]
pub struct CreateTransactionResponse {
    /// Recorded transaction ID
    pub transaction_id: TransactionId,
    /// Grand total (`sum(subtotal) + tax - discount`)
    pub total: Money,
    /// When the order was recorded
    pub created_at: DateTime<Utc>,
}

const fn rejection_reason(err: &Error) -> Option<&'static str> {
    match err {
        Error::Validation(_) => Some("validation"),
        Error::NotFound { .. } => Some("unknown_product"),
        Error::InsufficientStock { .. } => Some("insufficient_stock"),
        Error::Forbidden(_) | Error::Storage(_) => None,
    }
}

/// Run the order workflow and record one transaction.
///
/// Requires authentication; the authenticated user owns the transaction.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/api/transactions \
///   -H "Authorization: Bearer <user_uuid>" \
///   -H "Content-Type: application/json" \
///   -d '{
///     "items": [{"product_id": "<uuid>", "quantity": 3}],
///     "payment_method": "cash",
///     "tax": 5000,
///     "discount": 2000
///   }'
/// ```
pub async fn create_transaction(
    user: CurrentUser,
    State(state): State<AppState>,
    Json(draft): Json<OrderDraft>,
) -> Result<(StatusCode, Json<CreateTransactionResponse>), AppError> {
    let transaction = match state.transactions.place_order(user.0, draft).await {
        Ok(transaction) => transaction,
        Err(err) => {
            if let Some(reason) = rejection_reason(&err) {
                record_order_rejected(reason);
            }
            return Err(err.into());
        }
    };

    record_order_placed(transaction.total.minor(), transaction.items.len());

    Ok((
        StatusCode::CREATED,
        Json(CreateTransactionResponse {
            transaction_id: transaction.id,
            total: transaction.total,
            created_at: transaction.created_at,
        }),
    ))
}

/// List the caller's own transactions, newest first.
pub async fn list_transactions(
    user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let transactions = state.transactions.transactions_for(user.0).await?;
    Ok(Json(transactions))
}

/// Get one transaction. Returns 403 if the caller does not own it.
pub async fn get_transaction(
    user: CurrentUser,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Transaction>, AppError> {
    let transaction = state
        .transactions
        .transaction(user.0, TransactionId::from_uuid(id))
        .await?;
    Ok(Json(transaction))
}
