//! Shared application state for handlers.

use async_trait::async_trait;
use pos_core::{CatalogStore, Clock, DashboardStore, SystemClock, TransactionStore};
use std::sync::Arc;

/// Connectivity probe behind the readiness endpoint.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Whether the backing store can currently serve requests.
    async fn is_ready(&self) -> bool;
}

#[async_trait]
impl ReadinessProbe for pos_postgres::PostgresStore {
    async fn is_ready(&self) -> bool {
        self.ping().await
    }
}

/// Probe that always reports ready. Used by in-memory setups and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReady;

#[async_trait]
impl ReadinessProbe for AlwaysReady {
    async fn is_ready(&self) -> bool {
        true
    }
}

/// Application state shared across all request handlers.
///
/// Stores are held as trait objects so the same router serves the Postgres
/// backend in production and the in-memory backend in tests.
#[derive(Clone)]
pub struct AppState {
    /// Product and category catalog
    pub catalog: Arc<dyn CatalogStore>,
    /// Order recording and owner-scoped reads
    pub transactions: Arc<dyn TransactionStore>,
    /// Sales summaries and recommendations
    pub dashboard: Arc<dyn DashboardStore>,
    /// Time source for "today" on the dashboard
    pub clock: Arc<dyn Clock>,
    /// Backing-store connectivity probe
    pub probe: Arc<dyn ReadinessProbe>,
}

impl AppState {
    /// Create application state from explicit parts.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        transactions: Arc<dyn TransactionStore>,
        dashboard: Arc<dyn DashboardStore>,
        clock: Arc<dyn Clock>,
        probe: Arc<dyn ReadinessProbe>,
    ) -> Self {
        Self {
            catalog,
            transactions,
            dashboard,
            clock,
            probe,
        }
    }

    /// Create application state from one store implementing every contract.
    #[must_use]
    pub fn from_store<S>(store: Arc<S>, clock: Arc<dyn Clock>) -> Self
    where
        S: CatalogStore + TransactionStore + DashboardStore + 'static,
    {
        Self {
            catalog: store.clone(),
            transactions: store.clone(),
            dashboard: store,
            clock,
            probe: Arc::new(AlwaysReady),
        }
    }

    /// Replace the readiness probe.
    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn ReadinessProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Replace the clock. Tests pin this to a fixed instant.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

/// Default clock for production wiring.
#[must_use]
pub fn system_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}
