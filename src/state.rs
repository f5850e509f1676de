//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the database pool, resolved configuration, the shared HTTP
//! client for proxied routes, and the cached pulse snapshot maintained by
//! the background refresher.

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::services::pulse::PulseSnapshot;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    /// Reused client for proxy routes; connection pooling lives here.
    pub http: reqwest::Client,
    /// Latest pulse snapshot, refreshed by the background poller.
    /// `None` until the first successful refresh.
    pub pulse: Arc<RwLock<Option<PulseSnapshot>>>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self { pool, config, http: reqwest::Client::new(), pulse: Arc::new(RwLock::new(None)) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
