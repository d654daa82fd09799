//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::db::PgCheckoutStore;
use crate::services::CheckoutService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the pool rather than a connection;
/// each request borrows what it needs.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    checkout: CheckoutService<PgCheckoutStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let checkout = CheckoutService::new(PgCheckoutStore::new(pool.clone()));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                checkout,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Checkout orchestrator backed by this state's pool.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutService<PgCheckoutStore> {
        &self.inner.checkout
    }
}
