//! Dashboard aggregation.
//!
//! Counts are derived from whatever task list the caller currently holds;
//! nothing here is cached or persisted.

use serde::{Deserialize, Serialize};

use crate::task::TaskStatus;

/// The two task fields the dashboard looks at.
#[derive(Debug, Clone, Copy)]
pub struct TaskSnapshot<'a> {
    pub status: TaskStatus,
    pub due_date: Option<&'a str>,
}

/// Whether a task is overdue on `today`.
///
/// Both dates are `YYYY-MM-DD`; zero padding makes string order equal to
/// date order. A task due today is not overdue, and a done task never is.
pub fn is_overdue(status: TaskStatus, due_date: Option<&str>, today: &str) -> bool {
    match due_date {
        Some(due) if !due.is_empty() => due < today && !status.is_done(),
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_projects: usize,
    pub total_tasks: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub done: usize,
    pub overdue: usize,
}

impl DashboardStats {
    pub fn compute<'a, I>(total_projects: usize, tasks: I, today: &str) -> Self
    where
        I: IntoIterator<Item = TaskSnapshot<'a>>,
    {
        let mut stats = Self {
            total_projects,
            ..Self::default()
        };

        for task in tasks {
            stats.total_tasks += 1;
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Done => stats.done += 1,
            }
            if is_overdue(task.status, task.due_date, today) {
                stats.overdue += 1;
            }
        }

        stats
    }
}
