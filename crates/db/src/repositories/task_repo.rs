//! Repository for the `tasks` table.
//!
//! Every read goes through a left join on `projects` so rows carry the
//! owning project's name.

use sqlx::SqlitePool;
use taskboard_core::types::DbId;

use crate::models::task::{CreateTask, Task, TaskFilter, UpdateTask};

const SELECT_JOINED: &str = "SELECT t.id, t.title, t.description, t.status, t.priority, \
     t.due_date, t.project_id, p.name AS project_name \
     FROM tasks t LEFT JOIN projects p ON p.id = t.project_id";

pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task and return it with its project name resolved.
    ///
    /// A `project_id` that does not reference an existing project fails
    /// with a foreign key violation.
    pub async fn create(pool: &SqlitePool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO tasks (title, description, status, priority, due_date, project_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status.as_str())
        .bind(input.priority.as_str())
        .bind(&input.due_date)
        .bind(input.project_id)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("{SELECT_JOINED} WHERE t.id = ?1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tasks in id order, optionally restricted to one project.
    pub async fn list(pool: &SqlitePool, filter: TaskFilter) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("{SELECT_JOINED} WHERE (?1 IS NULL OR t.project_id = ?1) ORDER BY t.id");
        sqlx::query_as::<_, Task>(&query)
            .bind(filter.project_id)
            .fetch_all(pool)
            .await
    }

    /// Apply the non-`None` fields of `input`. Returns `true` if the row exists.
    ///
    /// `due_date` and `project_id` take an explicit clear: the flag bound
    /// next to each value selects between writing it (possibly `NULL`) and
    /// keeping the stored one.
    pub async fn update(pool: &SqlitePool, id: DbId, input: &UpdateTask) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tasks SET
                title = COALESCE(?2, title),
                description = COALESCE(?3, description),
                status = COALESCE(?4, status),
                priority = COALESCE(?5, priority),
                due_date = CASE WHEN ?6 THEN ?7 ELSE due_date END,
                project_id = CASE WHEN ?8 THEN ?9 ELSE project_id END
             WHERE id = ?1",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status.map(|s| s.as_str()))
        .bind(input.priority.map(|p| p.as_str()))
        .bind(input.due_date.is_some())
        .bind(input.due_date.clone().flatten())
        .bind(input.project_id.is_some())
        .bind(input.project_id.flatten())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a task by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
