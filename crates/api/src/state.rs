use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: roomkey_db::DbPool,
    /// Server configuration (slot catalog, civil clock, token secrets).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: roomkey_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
