//! Client-side board state.
//!
//! A [`Board`] is the one copy of projects, tasks and users a client holds.
//! It only changes through [`Board::apply`], and every derived view is
//! computed from its current contents on demand.

use taskboard_core::dashboard::{DashboardStats, TaskSnapshot};
use taskboard_core::task::TaskStatus;
use taskboard_core::types::DbId;

use crate::models::{Project, ProjectPatch, Task, TaskPatch, User};

/// One state change, applied after the matching API call succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    TasksReplaced(Vec<Task>),
    TaskCreated(Task),
    TaskUpdated { id: DbId, patch: TaskPatch },
    TaskStatusChanged { id: DbId, status: TaskStatus },
    TaskDeleted(DbId),

    ProjectsReplaced(Vec<Project>),
    ProjectCreated(Project),
    ProjectUpdated { id: DbId, patch: ProjectPatch },
    /// Also detaches the project's tasks, as the server does.
    ProjectDeleted(DbId),

    UsersReplaced(Vec<User>),
    UserAdded(User),
    UserUpdated(User),
}

/// Which tasks a list view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    pub fn matches(self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    tasks: Vec<Task>,
    projects: Vec<Project>,
    users: Vec<User>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn task(&self, id: DbId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn project(&self, id: DbId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Apply one mutation. Mutations naming an id the board does not hold
    /// are no-ops, matching the server's idempotent updates and deletes.
    pub fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::TasksReplaced(tasks) => self.tasks = tasks,
            Mutation::TaskCreated(task) => self.tasks.push(task),
            Mutation::TaskUpdated { id, patch } => {
                let project_name = patch.project_id.map(|pid| {
                    pid.and_then(|pid| self.project(pid))
                        .map(|p| p.name.clone())
                });
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    apply_task_patch(task, patch, project_name);
                }
            }
            Mutation::TaskStatusChanged { id, status } => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.status = status;
                }
            }
            Mutation::TaskDeleted(id) => self.tasks.retain(|t| t.id != id),

            Mutation::ProjectsReplaced(projects) => self.projects = projects,
            Mutation::ProjectCreated(project) => self.projects.push(project),
            Mutation::ProjectUpdated { id, patch } => {
                let Some(project) = self.projects.iter_mut().find(|p| p.id == id) else {
                    return;
                };
                apply_project_patch(project, &patch);
                if let Some(name) = patch.name {
                    for task in self.tasks.iter_mut().filter(|t| t.project_id == Some(id)) {
                        task.project_name = Some(name.clone());
                    }
                }
            }
            Mutation::ProjectDeleted(id) => {
                self.projects.retain(|p| p.id != id);
                for task in self.tasks.iter_mut().filter(|t| t.project_id == Some(id)) {
                    task.project_id = None;
                    task.project_name = None;
                }
            }

            Mutation::UsersReplaced(users) => self.users = users,
            Mutation::UserAdded(user) => self.users.push(user),
            Mutation::UserUpdated(user) => {
                if let Some(slot) = self.users.iter_mut().find(|u| u.id == user.id) {
                    *slot = user;
                }
            }
        }
    }

    /// Dashboard numbers over the tasks and projects currently held.
    pub fn stats(&self, today: &str) -> DashboardStats {
        let snapshots = self.tasks.iter().map(|t| TaskSnapshot {
            status: t.status,
            due_date: t.due_date.as_deref(),
        });
        DashboardStats::compute(self.projects.len(), snapshots, today)
    }

    /// Tasks passing `filter`, in board order.
    pub fn visible_tasks(&self, filter: StatusFilter) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(move |t| filter.matches(t.status))
    }

    /// Status a one-click toggle moves the task to, if the task is known.
    pub fn toggle_target(&self, id: DbId) -> Option<TaskStatus> {
        self.task(id).map(|t| t.status.toggled())
    }
}

/// `project_name` is `Some(resolved)` when the patch touches the task's
/// project; the inner `None` means it was cleared or is not on the board.
fn apply_task_patch(task: &mut Task, patch: TaskPatch, project_name: Option<Option<String>>) {
    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(desc) = patch.desc {
        task.desc = Some(desc);
    }
    if let Some(status) = patch.status {
        task.status = status;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(due) = patch.due_date {
        task.due_date = due;
    }
    if let Some(pid) = patch.project_id {
        task.project_id = pid;
        task.project_name = project_name.flatten();
    }
}

fn apply_project_patch(project: &mut Project, patch: &ProjectPatch) {
    if let Some(name) = &patch.name {
        project.name = name.clone();
    }
    if let Some(description) = &patch.description {
        project.description = Some(description.clone());
    }
    if let Some(status) = &patch.status {
        project.status = status.clone();
    }
    if let Some(start) = &patch.start_date {
        project.start_date = Some(start.clone());
    }
    if let Some(end) = &patch.end_date {
        project.end_date = Some(end.clone());
    }
}

#[cfg(test)]
mod tests {
    use taskboard_core::task::TaskPriority;

    use super::*;

    fn project(id: DbId, name: &str) -> Project {
        Project {
            id,
            name: name.to_string(),
            description: Some(String::new()),
            status: "active".to_string(),
            start_date: None,
            end_date: None,
        }
    }

    fn task(id: DbId, status: TaskStatus, due: Option<&str>, project: Option<&Project>) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            desc: None,
            status,
            priority: TaskPriority::Medium,
            due_date: due.map(str::to_string),
            project_id: project.map(|p| p.id),
            project_name: project.map(|p| p.name.clone()),
        }
    }

    fn seeded() -> Board {
        let web = project(1, "Website");
        let ops = project(2, "Ops");
        let mut board = Board::new();
        board.apply(Mutation::TasksReplaced(vec![
            task(10, TaskStatus::Pending, Some("2024-01-01"), Some(&web)),
            task(11, TaskStatus::Pending, Some("2099-01-01"), Some(&web)),
            task(12, TaskStatus::InProgress, None, Some(&ops)),
            task(13, TaskStatus::Done, Some("2000-01-01"), None),
        ]));
        board.apply(Mutation::ProjectsReplaced(vec![web, ops]));
        board
    }

    #[test]
    fn stats_follow_board_contents() {
        let board = seeded();
        let stats = board.stats("2024-06-01");
        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.total_tasks, 4);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.done, 1);
        assert_eq!(stats.overdue, 1);
    }

    #[test]
    fn visible_tasks_respect_status_filter() {
        let board = seeded();
        assert_eq!(board.visible_tasks(StatusFilter::All).count(), 4);
        let pending: Vec<DbId> = board
            .visible_tasks(StatusFilter::Only(TaskStatus::Pending))
            .map(|t| t.id)
            .collect();
        assert_eq!(pending, [10, 11]);
    }

    #[test]
    fn toggle_target_flips_done_and_finishes_the_rest() {
        let board = seeded();
        assert_eq!(board.toggle_target(10), Some(TaskStatus::Done));
        assert_eq!(board.toggle_target(12), Some(TaskStatus::Done));
        assert_eq!(board.toggle_target(13), Some(TaskStatus::Pending));
        assert_eq!(board.toggle_target(99), None);
    }

    #[test]
    fn deleting_a_project_detaches_its_tasks() {
        let mut board = seeded();
        board.apply(Mutation::ProjectDeleted(1));

        assert!(board.project(1).is_none());
        assert_eq!(board.tasks().len(), 4);
        for id in [10, 11] {
            let t = board.task(id).unwrap();
            assert_eq!(t.project_id, None);
            assert_eq!(t.project_name, None);
        }
        assert_eq!(board.task(12).unwrap().project_name.as_deref(), Some("Ops"));
    }

    #[test]
    fn renaming_a_project_renames_its_tasks() {
        let mut board = seeded();
        board.apply(Mutation::ProjectUpdated {
            id: 2,
            patch: ProjectPatch {
                name: Some("Platform".into()),
                ..Default::default()
            },
        });
        assert_eq!(board.project(2).unwrap().name, "Platform");
        assert_eq!(board.task(12).unwrap().project_name.as_deref(), Some("Platform"));
        assert_eq!(board.task(10).unwrap().project_name.as_deref(), Some("Website"));
    }

    #[test]
    fn task_patch_moves_project_and_keeps_other_fields() {
        let mut board = seeded();
        board.apply(Mutation::TaskUpdated {
            id: 10,
            patch: TaskPatch {
                project_id: Some(Some(2)),
                priority: Some(TaskPriority::High),
                ..Default::default()
            },
        });
        let t = board.task(10).unwrap();
        assert_eq!(t.project_name.as_deref(), Some("Ops"));
        assert_eq!(t.priority, TaskPriority::High);
        assert_eq!(t.status, TaskStatus::Pending);
        assert_eq!(t.due_date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn task_patch_clears_project_and_due_date() {
        let mut board = seeded();
        board.apply(Mutation::TaskUpdated {
            id: 11,
            patch: TaskPatch {
                project_id: Some(None),
                due_date: Some(None),
                ..Default::default()
            },
        });
        let t = board.task(11).unwrap();
        assert_eq!(t.project_id, None);
        assert_eq!(t.project_name, None);
        assert_eq!(t.due_date, None);
        assert_eq!(t.title, "task 11");
    }

    #[test]
    fn mutations_on_unknown_ids_change_nothing() {
        let mut board = seeded();
        let before = board.clone();
        board.apply(Mutation::TaskStatusChanged {
            id: 404,
            status: TaskStatus::Done,
        });
        board.apply(Mutation::TaskDeleted(404));
        board.apply(Mutation::ProjectDeleted(404));
        assert_eq!(board, before);
    }
}
