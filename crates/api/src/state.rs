use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted internally and the config
/// sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: taskboard_db::DbPool,
    /// Server configuration (the auth extractors read the JWT settings).
    pub config: Arc<ServerConfig>,
}
