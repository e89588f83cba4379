//! In-memory store backing the test suites and local demos.
//!
//! One mutex guards the whole state, so every order submission is a single
//! critical section: the stock check and decrement for all lines happen
//! while the lock is held, which gives the same all-or-nothing guarantee
//! the Postgres backend gets from a database transaction.

use async_trait::async_trait;
use chrono::NaiveDate;
use pos_core::{
    dashboard::top_products, CatalogStore, Category, CategoryId, Clock, DashboardStore,
    DashboardSummary, Error, LineItem, NewProduct, OrderDraft, Product, ProductId, ProductUpdate,
    Result, SystemClock, Transaction, TransactionId, TransactionStore, UserId,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Inner {
    categories: Vec<Category>,
    products: Vec<Product>,
    transactions: Vec<Transaction>,
}

/// In-memory implementation of every store contract.
pub struct MemoryStore {
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store on the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn create_product(&self, new: NewProduct) -> Result<Product> {
        let now = self.clock.now();
        let mut inner = self.lock();
        if !inner.categories.iter().any(|c| c.id == new.category_id) {
            return Err(Error::not_found("Category", new.category_id));
        }
        let product = Product {
            id: ProductId::new(),
            name: new.name,
            price: new.price,
            stock: new.stock,
            unit: new.unit,
            category_id: new.category_id,
            created_at: now,
            updated_at: now,
        };
        inner.products.push(product.clone());
        Ok(product)
    }

    async fn product(&self, id: ProductId) -> Result<Product> {
        self.lock()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("Product", id))
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let mut products = self.lock().products.clone();
        products.reverse();
        Ok(products)
    }

    async fn update_product(&self, id: ProductId, update: ProductUpdate) -> Result<Product> {
        let now = self.clock.now();
        let mut inner = self.lock();
        if let Some(category_id) = update.category_id {
            if !inner.categories.iter().any(|c| c.id == category_id) {
                return Err(Error::not_found("Category", category_id));
            }
        }
        let product = inner
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found("Product", id))?;
        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(stock) = update.stock {
            product.stock = stock;
        }
        if let Some(unit) = update.unit {
            product.unit = unit;
        }
        if let Some(category_id) = update.category_id {
            product.category_id = category_id;
        }
        product.updated_at = now;
        Ok(product.clone())
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        let mut inner = self.lock();
        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        if inner.products.len() == before {
            return Err(Error::not_found("Product", id));
        }
        Ok(())
    }

    async fn create_category(&self, name: String) -> Result<Category> {
        let category = Category {
            id: CategoryId::new(),
            name,
        };
        self.lock().categories.push(category.clone());
        Ok(category)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let mut categories = self.lock().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn place_order(&self, user_id: UserId, draft: OrderDraft) -> Result<Transaction> {
        draft.validate()?;
        let now = self.clock.now();

        // Single critical section: check every line, then decrement every
        // line. Nothing is mutated until the whole order is known to fit.
        let mut inner = self.lock();

        let mut required: HashMap<ProductId, u32> = HashMap::new();
        for item in &draft.items {
            *required.entry(item.product_id).or_insert(0) += item.quantity;
        }

        for (&product_id, &quantity) in &required {
            let product = inner
                .products
                .iter()
                .find(|p| p.id == product_id)
                .ok_or_else(|| Error::not_found("Product", product_id))?;
            if product.stock < quantity {
                return Err(Error::InsufficientStock {
                    name: product.name.clone(),
                });
            }
        }

        let mut lines = Vec::with_capacity(draft.items.len());
        for item in &draft.items {
            let product = inner
                .products
                .iter_mut()
                .find(|p| p.id == item.product_id)
                .ok_or_else(|| Error::not_found("Product", item.product_id))?;
            product.stock -= item.quantity;
            product.updated_at = now;
            lines.push(LineItem::new(
                product.id,
                product.name.clone(),
                product.price,
                item.quantity,
            ));
        }

        let total = pos_core::order::order_total(&lines, draft.tax, draft.discount);
        let transaction = Transaction {
            id: TransactionId::new(),
            user_id,
            items: lines,
            total,
            tax: draft.tax,
            discount: draft.discount,
            payment_method: draft.payment_method,
            created_at: now,
        };
        inner.transactions.push(transaction.clone());
        Ok(transaction)
    }

    async fn transaction(&self, caller: UserId, id: TransactionId) -> Result<Transaction> {
        let inner = self.lock();
        let tx = inner
            .transactions
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::not_found("Transaction", id))?;
        if tx.user_id != caller {
            return Err(Error::Forbidden("transaction belongs to another user"));
        }
        Ok(tx.clone())
    }

    async fn transactions_for(&self, caller: UserId) -> Result<Vec<Transaction>> {
        let inner = self.lock();
        let mut own: Vec<Transaction> = inner
            .transactions
            .iter()
            .filter(|t| t.user_id == caller)
            .cloned()
            .collect();
        own.reverse();
        Ok(own)
    }
}

#[async_trait]
impl DashboardStore for MemoryStore {
    async fn summary(&self, on: NaiveDate, top_n: usize) -> Result<DashboardSummary> {
        let inner = self.lock();
        let todays = inner
            .transactions
            .iter()
            .filter(|t| t.created_at.date_naive() == on);
        let (revenue, count) = todays.fold((pos_core::Money::ZERO, 0u64), |(rev, n), t| {
            (rev + t.total, n + 1)
        });
        Ok(DashboardSummary {
            total_revenue_today: revenue,
            total_transactions_today: count,
            top_products: top_products(&inner.transactions, top_n),
        })
    }

    async fn recommendations(&self, limit: usize) -> Result<Vec<Product>> {
        let inner = self.lock();
        let ranked = top_products(&inner.transactions, limit);

        let mut out = Vec::with_capacity(limit);
        for sales in &ranked {
            if let Some(product) = inner.products.iter().find(|p| p.id == sales.product_id) {
                out.push(product.clone());
            }
        }
        // Nothing sold yet (or every bestseller was deleted): newest first.
        if out.is_empty() {
            out = inner.products.iter().rev().take(limit).cloned().collect();
        }
        out.truncate(limit);
        Ok(out)
    }
}
