//! A signed-in client: an [`ApiClient`] plus the [`Board`] it keeps current.

use taskboard_core::dashboard::DashboardStats;
use taskboard_core::roles::Capabilities;
use taskboard_core::types::{today_iso, DbId};

use crate::api::{ApiClient, ClientError};
use crate::models::{
    NewProject, NewTask, NewUser, Project, ProjectPatch, SessionInfo, Task, TaskPatch, User,
    UserPatch,
};
use crate::store::{Board, Mutation, StatusFilter};

/// Each method performs one API call and, only if it succeeds, applies the
/// matching [`Mutation`]. On error the board is left as it was.
pub struct Session {
    api: ApiClient,
    info: SessionInfo,
    board: Board,
}

impl Session {
    /// Resolve the caller's identity and load the initial board.
    pub async fn connect(api: ApiClient) -> Result<Self, ClientError> {
        let info = api.me().await?;
        tracing::debug!(subject = %info.subject, role = %info.role.as_str(), "Session established");
        let mut session = Self {
            api,
            info,
            board: Board::new(),
        };
        session.refresh().await?;
        Ok(session)
    }

    pub fn info(&self) -> &SessionInfo {
        &self.info
    }

    pub fn capabilities(&self) -> Capabilities {
        self.info.capabilities
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Reload tasks, projects and users from the server. The board only
    /// changes once all three lists have arrived.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let tasks = self.api.list_tasks(None).await?;
        let projects = self.api.list_projects().await?;
        let users = self.api.list_users().await?;
        self.board.apply(Mutation::TasksReplaced(tasks));
        self.board.apply(Mutation::ProjectsReplaced(projects));
        self.board.apply(Mutation::UsersReplaced(users));
        Ok(())
    }

    /// Replace the task list with the server's, optionally for one project.
    pub async fn load_tasks(&mut self, project_id: Option<DbId>) -> Result<(), ClientError> {
        let tasks = self.api.list_tasks(project_id).await?;
        self.board.apply(Mutation::TasksReplaced(tasks));
        Ok(())
    }

    // ---- derived views ----

    /// Stats for today's UTC date, from the board.
    pub fn stats(&self) -> DashboardStats {
        self.board.stats(&today_iso())
    }

    pub fn visible_tasks(&self, filter: StatusFilter) -> Vec<&Task> {
        self.board.visible_tasks(filter).collect()
    }

    // ---- projects ----

    pub async fn create_project(&mut self, input: &NewProject) -> Result<Project, ClientError> {
        let project = self.api.create_project(input).await?;
        self.board.apply(Mutation::ProjectCreated(project.clone()));
        Ok(project)
    }

    /// The patch is normalized first so the board holds what the server stores.
    pub async fn update_project(&mut self, id: DbId, patch: ProjectPatch) -> Result<(), ClientError> {
        let patch = patch.normalized()?;
        self.api.update_project(id, &patch).await?;
        self.board.apply(Mutation::ProjectUpdated { id, patch });
        Ok(())
    }

    pub async fn delete_project(&mut self, id: DbId) -> Result<(), ClientError> {
        self.api.delete_project(id).await?;
        self.board.apply(Mutation::ProjectDeleted(id));
        Ok(())
    }

    // ---- tasks ----

    pub async fn create_task(&mut self, input: &NewTask) -> Result<Task, ClientError> {
        let task = self.api.create_task(input).await?;
        self.board.apply(Mutation::TaskCreated(task.clone()));
        Ok(task)
    }

    pub async fn update_task(&mut self, id: DbId, patch: TaskPatch) -> Result<(), ClientError> {
        let patch = patch.normalized()?;
        self.api.update_task(id, &patch).await?;
        self.board.apply(Mutation::TaskUpdated { id, patch });
        Ok(())
    }

    /// Flip a task between done and not done.
    pub async fn toggle_task(&mut self, id: DbId) -> Result<(), ClientError> {
        let status = self
            .board
            .toggle_target(id)
            .ok_or(ClientError::UnknownTask(id))?;
        self.api.update_task(id, &TaskPatch::status(status)).await?;
        self.board.apply(Mutation::TaskStatusChanged { id, status });
        Ok(())
    }

    pub async fn delete_task(&mut self, id: DbId) -> Result<(), ClientError> {
        self.api.delete_task(id).await?;
        self.board.apply(Mutation::TaskDeleted(id));
        Ok(())
    }

    // ---- users ----

    pub async fn add_user(&mut self, input: &NewUser) -> Result<User, ClientError> {
        let user = self.api.create_user(input).await?;
        self.board.apply(Mutation::UserAdded(user.clone()));
        Ok(user)
    }

    pub async fn update_user(&mut self, id: DbId, patch: &UserPatch) -> Result<User, ClientError> {
        let user = self.api.update_user(id, patch).await?;
        self.board.apply(Mutation::UserUpdated(user.clone()));
        Ok(user)
    }
}
