//! Handlers for the `/projects` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use taskboard_core::error::CoreError;
use taskboard_core::project::{DEFAULT_DESCRIPTION, DEFAULT_PROJECT_STATUS};
use taskboard_core::types::DbId;
use taskboard_core::validation::{optional_date, optional_non_blank, require_text};
use taskboard_db::models::project::{CreateProject, Project, UpdateProject};
use taskboard_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::response::Ack;
use crate::state::AppState;

/// Request body shared by create and update. Every field is optional on
/// the wire; required-ness is decided by [`ProjectInput::into_create`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ProjectInput {
    /// Validate a create request and fill in defaults.
    pub fn into_create(self) -> Result<CreateProject, CoreError> {
        let name = require_text("name", self.name.as_deref())?;
        let status = self
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_PROJECT_STATUS)
            .to_string();

        Ok(CreateProject {
            name,
            description: self
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            status,
            start_date: optional_date("startDate", self.start_date.as_deref())?,
            end_date: optional_date("endDate", self.end_date.as_deref())?,
        })
    }

    /// Validate a partial update. Absent fields stay `None`.
    pub fn into_update(self) -> Result<UpdateProject, CoreError> {
        Ok(UpdateProject {
            name: optional_non_blank("name", self.name.as_deref())?,
            description: self.description,
            status: optional_non_blank("status", self.status.as_deref())?,
            start_date: optional_date("startDate", self.start_date.as_deref())?,
            end_date: optional_date("endDate", self.end_date.as_deref())?,
        })
    }
}

/// POST /projects
pub async fn create(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    payload: Result<Json<ProjectInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let Json(input) = payload?;
    let input = input.into_create()?;
    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = project.id, by = %user.subject, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /projects
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /projects/{id}
///
/// Acknowledges even when no project has this id.
pub async fn update(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    payload: Result<Json<ProjectInput>, JsonRejection>,
) -> AppResult<Json<Ack>> {
    let Json(input) = payload?;
    let input = input.into_update()?;
    let found = ProjectRepo::update(&state.pool, id, &input).await?;
    if !found {
        tracing::debug!(project_id = id, "Update matched no project");
    }
    Ok(Json(Ack::ok()))
}

/// DELETE /projects/{id}
///
/// Idempotent: deleting an unknown id is still a success. Dependent tasks
/// are detached by the schema, not deleted.
pub async fn delete(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ack>> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(project_id = id, by = %user.subject, "Project deleted");
    } else {
        tracing::debug!(project_id = id, "Delete matched no project");
    }
    Ok(Json(Ack::ok()))
}
