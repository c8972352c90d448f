pub mod health;
pub mod project;
pub mod task;
pub mod user;

use axum::routing::get;
use axum::Router;

use crate::handlers::{dashboard, session};
use crate::state::AppState;

/// Build the authenticated route tree.
///
/// ```text
/// /me                  caller identity and capabilities
/// /dashboard           summary stats (?today=YYYY-MM-DD)
///
/// /projects            list, create
/// /projects/{id}       get, update, delete
///
/// /tasks               list (?projectId=), create
/// /tasks/{id}          get, update, delete
///
/// /users               list, create
/// /users/{id}          update
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(session::me))
        .route("/dashboard", get(dashboard::summary))
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
        .nest("/users", user::router())
}
