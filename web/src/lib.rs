//! HTTP surface for the POS backend.
//!
//! The imperative shell around `pos-core`: Axum handlers, bearer-token
//! identity, the HTTP error mapping, configuration, and metrics. Handlers
//! stay thin; all domain logic lives behind the store contracts, so the
//! same router runs against Postgres in production and the in-memory store
//! in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::AppError;
pub use routes::build_router;
pub use state::{AlwaysReady, AppState, ReadinessProbe};
