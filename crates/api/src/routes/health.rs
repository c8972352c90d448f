//! `GET /health`, mounted at the root and reachable without a token.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Ok,
    /// Serving, but the database did not answer.
    Degraded,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl Health {
    fn from_db_check(check: Result<(), sqlx::Error>) -> Self {
        let db_healthy = match check {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database unreachable during health check");
                false
            }
        };
        Self {
            status: if db_healthy {
                ServiceStatus::Ok
            } else {
                ServiceStatus::Degraded
            },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health::from_db_check(
        taskboard_db::health_check(&state.pool).await,
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
