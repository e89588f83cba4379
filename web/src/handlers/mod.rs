//! Request handlers for the POS API.

pub mod categories;
pub mod dashboard;
pub mod health;
pub mod products;
pub mod transactions;
