//! Sales summary queries over the JSONB line-item snapshots.
//!
//! The top-products ranking aggregates the frozen snapshots with
//! `jsonb_array_elements`, so it reflects what actually sold — including
//! products since renamed or deleted from the catalog.

use crate::catalog::product_from_row;
use crate::{db_err, PostgresStore};
use async_trait::async_trait;
use chrono::NaiveDate;
use pos_core::{
    DashboardStore, DashboardSummary, Money, Product, ProductId, ProductSales, Result,
};
use uuid::Uuid;

fn limit_arg(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[async_trait]
impl DashboardStore for PostgresStore {
    async fn summary(&self, on: NaiveDate, top_n: usize) -> Result<DashboardSummary> {
        let (revenue, count): (i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(total), 0), COUNT(*)
             FROM transactions
             WHERE (created_at AT TIME ZONE 'UTC')::date = $1",
        )
        .bind(on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_err("failed to aggregate daily sales", e))?;

        let rows: Vec<(Uuid, String, i64)> = sqlx::query_as(
            "SELECT (item ->> 'product_id')::uuid AS product_id,
                    (array_agg(item ->> 'name' ORDER BY t.created_at DESC))[1] AS name,
                    SUM((item ->> 'quantity')::bigint) AS total_sold
             FROM transactions t
             CROSS JOIN LATERAL jsonb_array_elements(t.items) AS item
             GROUP BY 1
             ORDER BY total_sold DESC, name ASC, product_id ASC
             LIMIT $1",
        )
        .bind(limit_arg(top_n))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("failed to rank top products", e))?;

        let top_products = rows
            .into_iter()
            .map(|(product_id, name, total_sold)| ProductSales {
                product_id: ProductId::from_uuid(product_id),
                name,
                total_sold: u64::try_from(total_sold).unwrap_or_default(),
            })
            .collect();

        Ok(DashboardSummary {
            total_revenue_today: Money::from_minor(revenue),
            total_transactions_today: u64::try_from(count).unwrap_or_default(),
            top_products,
        })
    }

    async fn recommendations(&self, limit: usize) -> Result<Vec<Product>> {
        let rows: Vec<crate::catalog::ProductRow> = sqlx::query_as(
            "WITH sales AS (
                 SELECT (item ->> 'product_id')::uuid AS product_id,
                        SUM((item ->> 'quantity')::bigint) AS sold
                 FROM transactions t
                 CROSS JOIN LATERAL jsonb_array_elements(t.items) AS item
                 GROUP BY 1
             )
             SELECT p.id, p.name, p.price, p.stock, p.unit, p.category_id,
                    p.created_at, p.updated_at
             FROM products p
             JOIN sales s ON s.product_id = p.id
             ORDER BY s.sold DESC, p.name ASC
             LIMIT $1",
        )
        .bind(limit_arg(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("failed to rank recommendations", e))?;

        if !rows.is_empty() {
            return Ok(rows.into_iter().map(product_from_row).collect());
        }

        // Nothing sold yet: fall back to the newest products.
        let rows: Vec<crate::catalog::ProductRow> = sqlx::query_as(
            "SELECT id, name, price, stock, unit, category_id, created_at, updated_at
             FROM products
             ORDER BY created_at DESC
             LIMIT $1",
        )
        .bind(limit_arg(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("failed to list fallback recommendations", e))?;

        Ok(rows.into_iter().map(product_from_row).collect())
    }
}
