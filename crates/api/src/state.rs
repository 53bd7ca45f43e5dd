use std::sync::Arc;

use crate::config::ServerConfig;
use crate::service::WorkProjectService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: worklog_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Record service for work projects, sharing `pool`.
    pub projects: WorkProjectService,
}

impl AppState {
    pub fn new(pool: worklog_db::DbPool, config: ServerConfig) -> Self {
        Self {
            projects: WorkProjectService::new(pool.clone()),
            pool,
            config: Arc::new(config),
        }
    }
}
