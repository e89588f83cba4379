//! Domain model and store contracts for the POS backend.
//!
//! This crate is the functional core of the system: value types, the error
//! taxonomy, the order pricing logic, and the traits the storage backends
//! implement. It performs no I/O of its own.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (web)          │  ← HTTP, JSON, auth headers
//! ├─────────────────────────────────────────┤
//! │         Functional Core (this crate)    │
//! │  - Value types (Money, ids, snapshots)  │
//! │  - Order pricing and validation         │
//! │  - Store contracts (catalog / orders /  │
//! │    dashboard)                           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The one piece of real logic here is the order workflow: resolving each
//! requested line against the catalog, checking and decrementing stock as a
//! single atomic unit of work, freezing a line-item snapshot, and computing
//! the final total. The store implementations (`pos-postgres`,
//! `pos-testing`) own the atomicity; this crate owns the arithmetic and the
//! contract.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod clock;
pub mod dashboard;
pub mod error;
pub mod order;
pub mod types;

pub use catalog::{CatalogStore, Category, NewProduct, Product, ProductUpdate};
pub use clock::{Clock, SystemClock};
pub use dashboard::{DashboardStore, DashboardSummary, ProductSales};
pub use error::{Error, Result};
pub use order::{LineItem, OrderDraft, OrderItem, Transaction, TransactionStore};
pub use types::{CategoryId, Money, PaymentMethod, ProductId, TransactionId, UserId};
