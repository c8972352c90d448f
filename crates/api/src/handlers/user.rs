//! Handlers for the `/users` directory.
//!
//! Listing is open to any signed-in caller; changes need the admin role.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use taskboard_core::error::CoreError;
use taskboard_core::roles::Role;
use taskboard_core::types::DbId;
use taskboard_core::validation::{optional_non_blank, require_email, require_text};
use taskboard_db::models::user::{CreateUser, UpdateUser, User};
use taskboard_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
}

impl UserInput {
    fn role(&self) -> Result<Option<Role>, CoreError> {
        self.role
            .as_deref()
            .map(|r| Role::from_str_value(r.trim()))
            .transpose()
    }

    pub fn into_create(self) -> Result<CreateUser, CoreError> {
        Ok(CreateUser {
            name: require_text("name", self.name.as_deref())?,
            email: require_email("email", self.email.as_deref())?,
            role: self.role()?.unwrap_or_default(),
        })
    }

    pub fn into_update(self) -> Result<UpdateUser, CoreError> {
        let email = match self.email.as_deref() {
            None => None,
            Some(e) => Some(require_email("email", Some(e))?),
        };
        Ok(UpdateUser {
            name: optional_non_blank("name", self.name.as_deref())?,
            email,
            role: self.role()?,
            active: self.active,
        })
    }
}

/// GET /users
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Vec<User>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users))
}

/// POST /users
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<User>)> {
    let Json(input) = payload?;
    let input = input.into_create()?;
    let user = UserRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.id, role = %user.role, by = %admin.subject, "User added");
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users/{id}
///
/// Covers role changes and activation toggles. Unlike projects and tasks,
/// an unknown id is reported as 404.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> AppResult<Json<User>> {
    let Json(input) = payload?;
    let input = input.into_update()?;
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    tracing::info!(user_id = id, by = %admin.subject, "User updated");
    Ok(Json(user))
}
