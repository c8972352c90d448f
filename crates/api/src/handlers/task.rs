//! Handlers for the `/tasks` resource.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use taskboard_core::error::CoreError;
use taskboard_core::project::DEFAULT_DESCRIPTION;
use taskboard_core::task::{TaskPriority, TaskStatus};
use taskboard_core::types::{nullable, DbId};
use taskboard_core::validation::{optional_date, optional_non_blank, patch_date, require_text};
use taskboard_db::models::task::{CreateTask, Task, TaskFilter, UpdateTask};
use taskboard_db::repositories::TaskRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::query::TaskListParams;
use crate::response::Ack;
use crate::state::AppState;

/// Request body shared by create and update.
///
/// `dueDate` and `projectId` keep an explicit `null` apart from an absent
/// key so an update can clear them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub title: Option<String>,
    pub desc: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub project_id: Option<Option<DbId>>,
}

impl TaskInput {
    /// Validate a create request: `title`, `status` and `priority` are required.
    pub fn into_create(self) -> Result<CreateTask, CoreError> {
        let title = require_text("title", self.title.as_deref())?;
        let status = match self.status.as_deref() {
            Some(s) if !s.trim().is_empty() => TaskStatus::from_str_value(s.trim())?,
            _ => return Err(CoreError::MissingField("status")),
        };
        let priority = match self.priority.as_deref() {
            Some(p) if !p.trim().is_empty() => TaskPriority::from_str_value(p.trim())?,
            _ => return Err(CoreError::MissingField("priority")),
        };

        Ok(CreateTask {
            title,
            description: self.desc.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            status,
            priority,
            due_date: optional_date("dueDate", self.due_date.as_ref().and_then(Option::as_deref))?,
            project_id: self.project_id.flatten(),
        })
    }

    /// Validate a partial update. At least one field must be present.
    pub fn into_update(self) -> Result<UpdateTask, CoreError> {
        let update = UpdateTask {
            title: optional_non_blank("title", self.title.as_deref())?,
            description: self.desc,
            status: self
                .status
                .as_deref()
                .map(|s| TaskStatus::from_str_value(s.trim()))
                .transpose()?,
            priority: self
                .priority
                .as_deref()
                .map(|p| TaskPriority::from_str_value(p.trim()))
                .transpose()?,
            due_date: patch_date("dueDate", self.due_date.as_ref().map(Option::as_deref))?,
            project_id: self.project_id,
        };

        if update.is_empty() {
            return Err(CoreError::Validation(
                "At least one field to update is required".into(),
            ));
        }
        Ok(update)
    }
}

/// POST /tasks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let Json(input) = payload?;
    let input = input.into_create()?;
    let task = TaskRepo::create(&state.pool, &input).await?;
    tracing::info!(task_id = task.id, project_id = ?task.project_id, by = %user.subject, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /tasks?projectId=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    params: Result<Query<TaskListParams>, QueryRejection>,
) -> AppResult<Json<Vec<Task>>> {
    let Query(params) = params?;
    let filter = TaskFilter {
        project_id: params.project_id()?,
    };
    let tasks = TaskRepo::list(&state.pool, filter).await?;
    Ok(Json(tasks))
}

/// GET /tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// PUT /tasks/{id}
///
/// Any subset of the task fields; a bare `{"status": ...}` is the common
/// case. Acknowledges even when no task has this id.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> AppResult<Json<Ack>> {
    let Json(input) = payload?;
    let input = input.into_update()?;
    let found = TaskRepo::update(&state.pool, id, &input).await?;
    if !found {
        tracing::debug!(task_id = id, "Update matched no task");
    }
    Ok(Json(Ack::ok()))
}

/// DELETE /tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ack>> {
    if TaskRepo::delete(&state.pool, id).await? {
        tracing::info!(task_id = id, by = %user.subject, "Task deleted");
    }
    Ok(Json(Ack::ok()))
}
