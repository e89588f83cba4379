//! Testing utilities for the POS backend.
//!
//! This crate provides:
//! - [`MemoryStore`]: an in-memory implementation of all three store
//!   contracts, serialized behind one mutex so the order unit of work is
//!   atomic by construction
//! - [`mocks::FixedClock`]: deterministic time for dashboard tests
//! - [`fixtures`]: seed catalog data mirroring the production seeders
//!
//! ## Example
//!
//! ```ignore
//! use pos_testing::{fixtures, MemoryStore};
//!
//! #[tokio::test]
//! async fn order_decrements_stock() {
//!     let store = MemoryStore::new();
//!     let products = fixtures::seed_catalog(&store).await.unwrap();
//!     // place orders against `store`...
//! }
//! ```

pub mod fixtures;
pub mod memory;
pub mod mocks;

pub use memory::MemoryStore;
pub use mocks::{test_clock, FixedClock};
