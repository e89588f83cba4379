//! `PostgreSQL` store implementation for the POS backend.
//!
//! Implements the `pos-core` store contracts on top of sqlx. The order
//! workflow runs inside one database transaction, and each line's stock
//! check is embedded in the decrement itself:
//!
//! ```sql
//! UPDATE products SET stock = stock - $quantity
//! WHERE id = $id AND stock >= $quantity
//! RETURNING name, price
//! ```
//!
//! Concurrent orders against the same product serialize on the row lock, so
//! the check-then-act race cannot oversell; a failure on any line aborts the
//! whole transaction and rolls back every earlier decrement.
//!
//! # Example
//!
//! ```ignore
//! use pos_postgres::PostgresStore;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let store = PostgresStore::connect("postgres://localhost/pos", 10).await?;
//!     store.migrate().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod catalog;
mod dashboard;
mod transactions;

use pos_core::Error;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// PostgreSQL-backed implementation of every store contract.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the database with a bounded pool.
    ///
    /// # Errors
    ///
    /// Returns [`pos_core::Error::Storage`] if the connection fails.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| db_err("failed to connect", e))?;
        Ok(Self::new(pool))
    }

    /// Run the schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`pos_core::Error::Storage`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), Error> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Storage(anyhow::Error::new(e).context("migration failed")))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    ///
    /// Useful for custom queries or health checks.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Cheap connectivity probe for the readiness endpoint.
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

/// Map a sqlx error into the domain `Storage` variant with context.
pub(crate) fn db_err(context: &'static str, e: sqlx::Error) -> Error {
    Error::Storage(anyhow::Error::new(e).context(context))
}
