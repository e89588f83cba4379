//! Sales summaries derived from the frozen line-item snapshots.
//!
//! The aggregation is real: quantities are summed per product id across
//! transaction snapshots, not sampled from the catalog.

use crate::catalog::Product;
use crate::error::Result;
use crate::order::Transaction;
use crate::types::{Money, ProductId};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Units sold for one product, aggregated across transactions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSales {
    /// Product identifier (from the snapshot; the product may be deleted)
    pub product_id: ProductId,
    /// Product name as last seen in a snapshot
    pub name: String,
    /// Total units sold
    pub total_sold: u64,
}

/// Dashboard figures for one calendar day plus the all-time bestsellers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Revenue recorded on the day (sum of transaction totals)
    pub total_revenue_today: Money,
    /// Number of transactions recorded on the day
    pub total_transactions_today: u64,
    /// Best-selling products by summed snapshot quantity, descending
    pub top_products: Vec<ProductSales>,
}

/// Sum quantities per product id across transaction snapshots and return the
/// top `limit`, descending.
///
/// Ties break by name, then product id, so the ordering is deterministic.
/// The name reported is the one from the most recent snapshot mentioning
/// the product.
#[must_use]
pub fn top_products<'a, I>(transactions: I, limit: usize) -> Vec<ProductSales>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut sold: HashMap<ProductId, (String, u64)> = HashMap::new();
    for tx in transactions {
        for line in &tx.items {
            let entry = sold
                .entry(line.product_id)
                .or_insert_with(|| (line.name.clone(), 0));
            entry.0.clone_from(&line.name);
            entry.1 += u64::from(line.quantity);
        }
    }

    let mut ranked: Vec<ProductSales> = sold
        .into_iter()
        .map(|(product_id, (name, total_sold))| ProductSales {
            product_id,
            name,
            total_sold,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.total_sold
            .cmp(&a.total_sold)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.product_id.as_uuid().cmp(b.product_id.as_uuid()))
    });
    ranked.truncate(limit);
    ranked
}

/// Read-only sales summaries.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// Revenue and count for the given UTC day, plus the all-time top
    /// `top_n` products.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] on backend failure.
    async fn summary(&self, on: NaiveDate, top_n: usize) -> Result<DashboardSummary>;

    /// Best-selling products resolved back to the live catalog.
    ///
    /// Falls back to the newest products when nothing has sold yet, so the
    /// endpoint stays useful on an empty system.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] on backend failure.
    async fn recommendations(&self, limit: usize) -> Result<Vec<Product>>;
}
