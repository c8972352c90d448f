//! Handler for the `/dashboard` summary.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use taskboard_core::dashboard::{DashboardStats, TaskSnapshot};
use taskboard_core::task::TaskStatus;
use taskboard_core::types::today_iso;
use taskboard_core::validation::optional_date;
use taskboard_db::models::task::TaskFilter;
use taskboard_db::repositories::{ProjectRepo, TaskRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::DashboardParams;
use crate::state::AppState;

/// GET /dashboard?today=YYYY-MM-DD
///
/// Recomputed from the current rows on every call.
pub async fn summary(
    State(state): State<AppState>,
    _user: AuthUser,
    params: Result<Query<DashboardParams>, QueryRejection>,
) -> AppResult<Json<DashboardStats>> {
    let Query(params) = params?;
    let today = optional_date("today", params.today.as_deref())?.unwrap_or_else(today_iso);

    let total_projects = ProjectRepo::count(&state.pool).await?;
    let tasks = TaskRepo::list(&state.pool, TaskFilter::default()).await?;

    let snapshots = tasks.iter().filter_map(|task| {
        match TaskStatus::from_str_value(&task.status) {
            Ok(status) => Some(TaskSnapshot {
                status,
                due_date: task.due_date.as_deref(),
            }),
            Err(_) => {
                tracing::warn!(task_id = task.id, status = %task.status, "Skipping task with unknown status");
                None
            }
        }
    });

    let stats = DashboardStats::compute(
        usize::try_from(total_projects).unwrap_or_default(),
        snapshots,
        &today,
    );
    Ok(Json(stats))
}
