//! Task entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use taskboard_core::task::{TaskPriority, TaskStatus};
use taskboard_core::types::DbId;

/// A task row joined with its project's name.
///
/// `project_name` is `None` for unassigned tasks.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    pub title: String,
    #[serde(rename = "desc")]
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<String>,
    pub project_id: Option<DbId>,
    pub project_name: Option<String>,
}

/// Validated input for a new task.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<String>,
    pub project_id: Option<DbId>,
}

/// Partial task update. `None` keeps the stored value; for the nullable
/// columns `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<String>>,
    pub project_id: Option<Option<DbId>>,
}

impl UpdateTask {
    /// A patch that only moves the task to `status`.
    pub fn status_only(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.project_id.is_none()
    }
}

/// Filters accepted by [`crate::repositories::TaskRepo::list`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub project_id: Option<DbId>,
}
