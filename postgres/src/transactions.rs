//! The order unit of work and owner-scoped transaction reads.

use crate::{db_err, PostgresStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pos_core::{
    Error, LineItem, Money, OrderDraft, PaymentMethod, Result, Transaction, TransactionId,
    TransactionStore, UserId,
};
use uuid::Uuid;

type TransactionRow = (
    Uuid,
    Uuid,
    serde_json::Value,
    i64,
    i64,
    i64,
    String,
    DateTime<Utc>,
);

const TRANSACTION_COLUMNS: &str =
    "id, user_id, items, total, tax, discount, payment_method, created_at";

fn transaction_from_row(row: TransactionRow) -> Result<Transaction> {
    let (id, user_id, items, total, tax, discount, payment_method, created_at) = row;
    let items: Vec<LineItem> = serde_json::from_value(items)
        .map_err(|e| Error::Storage(anyhow::Error::new(e).context("corrupt items snapshot")))?;
    let payment_method = PaymentMethod::parse(&payment_method).ok_or_else(|| {
        Error::Storage(anyhow::anyhow!(
            "unknown payment method in row: {payment_method}"
        ))
    })?;
    Ok(Transaction {
        id: TransactionId::from_uuid(id),
        user_id: UserId::from_uuid(user_id),
        items,
        total: Money::from_minor(total),
        tax: Money::from_minor(tax),
        discount: Money::from_minor(discount),
        payment_method,
        created_at,
    })
}

#[async_trait]
impl TransactionStore for PostgresStore {
    async fn place_order(&self, user_id: UserId, draft: OrderDraft) -> Result<Transaction> {
        draft.validate()?;

        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_err("failed to begin transaction", e))?;

        let mut lines = Vec::with_capacity(draft.items.len());
        for item in &draft.items {
            // The availability check is embedded in the decrement: the row
            // lock serializes concurrent orders, and a miss means either an
            // unknown product or not enough stock.
            let decremented: Option<(String, i64)> = sqlx::query_as(
                "UPDATE products
                 SET stock = stock - $2, updated_at = now()
                 WHERE id = $1 AND stock >= $2
                 RETURNING name, price",
            )
            .bind(item.product_id.as_uuid())
            .bind(i64::from(item.quantity))
            .fetch_optional(&mut *db_tx)
            .await
            .map_err(|e| db_err("failed to decrement stock", e))?;

            let Some((name, price)) = decremented else {
                let existing: Option<(String,)> =
                    sqlx::query_as("SELECT name FROM products WHERE id = $1")
                        .bind(item.product_id.as_uuid())
                        .fetch_optional(&mut *db_tx)
                        .await
                        .map_err(|e| db_err("failed to resolve product", e))?;
                // Dropping db_tx rolls back every decrement made so far.
                return match existing {
                    Some((name,)) => Err(Error::InsufficientStock { name }),
                    None => Err(Error::not_found("Product", item.product_id)),
                };
            };

            lines.push(LineItem::new(
                item.product_id,
                name,
                Money::from_minor(price),
                item.quantity,
            ));
        }

        let total = pos_core::order::order_total(&lines, draft.tax, draft.discount);
        let id = TransactionId::new();
        let items_json = serde_json::to_value(&lines)
            .map_err(|e| Error::Storage(anyhow::Error::new(e).context("failed to encode items")))?;

        let (created_at,): (DateTime<Utc>,) = sqlx::query_as(
            "INSERT INTO transactions
                 (id, user_id, items, total, tax, discount, payment_method)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING created_at",
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(&items_json)
        .bind(total.minor())
        .bind(draft.tax.minor())
        .bind(draft.discount.minor())
        .bind(draft.payment_method.as_str())
        .fetch_one(&mut *db_tx)
        .await
        .map_err(|e| db_err("failed to insert transaction", e))?;

        db_tx
            .commit()
            .await
            .map_err(|e| db_err("failed to commit transaction", e))?;

        tracing::info!(
            transaction_id = %id,
            user_id = %user_id,
            total = total.minor(),
            lines = lines.len(),
            "Order recorded"
        );

        Ok(Transaction {
            id,
            user_id,
            items: lines,
            total,
            tax: draft.tax,
            discount: draft.discount,
            payment_method: draft.payment_method,
            created_at,
        })
    }

    async fn transaction(&self, caller: UserId, id: TransactionId) -> Result<Transaction> {
        let row: Option<TransactionRow> = sqlx::query_as(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("failed to fetch transaction", e))?;

        let tx = row
            .map(transaction_from_row)
            .transpose()?
            .ok_or_else(|| Error::not_found("Transaction", id))?;
        if tx.user_id != caller {
            return Err(Error::Forbidden("transaction belongs to another user"));
        }
        Ok(tx)
    }

    async fn transactions_for(&self, caller: UserId) -> Result<Vec<Transaction>> {
        let rows: Vec<TransactionRow> = sqlx::query_as(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions
             WHERE user_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(caller.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("failed to list transactions", e))?;

        rows.into_iter().map(transaction_from_row).collect()
    }
}
