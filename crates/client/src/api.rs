//! HTTP client for the task board API, built on [`reqwest`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use taskboard_core::dashboard::DashboardStats;
use taskboard_core::error::CoreError;
use taskboard_core::types::DbId;

use crate::models::{
    Ack, ErrorBody, Health, NewProject, NewTask, NewUser, Project, ProjectPatch, SessionInfo,
    Task, TaskPatch, User, UserPatch,
};

/// Errors surfaced to callers of [`ApiClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API error ({status} {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// A write endpoint answered without `success: true`.
    #[error("API did not acknowledge the request")]
    NotAcknowledged,

    /// The board holds no task with this id.
    #[error("Unknown task {0}")]
    UnknownTask(DbId),

    /// A patch failed the checks the server would apply; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] CoreError),
}

impl ClientError {
    /// HTTP status of an API error, if there was a response at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// HTTP client bound to one API base URL and one bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// * `base_url` - e.g. `http://localhost:3001`, without a trailing slash.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach the identity provider's access token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    // ---- session ----

    pub async fn health(&self) -> Result<Health, ClientError> {
        self.get_json("/health", &[]).await
    }

    pub async fn me(&self) -> Result<SessionInfo, ClientError> {
        self.get_json("/me", &[]).await
    }

    /// Server-computed stats for `today` (`YYYY-MM-DD`).
    pub async fn dashboard(&self, today: &str) -> Result<DashboardStats, ClientError> {
        self.get_json("/dashboard", &[("today", today.to_string())])
            .await
    }

    // ---- projects ----

    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        self.get_json("/projects", &[]).await
    }

    pub async fn get_project(&self, id: DbId) -> Result<Project, ClientError> {
        self.get_json(&format!("/projects/{id}"), &[]).await
    }

    pub async fn create_project(&self, input: &NewProject) -> Result<Project, ClientError> {
        self.send_json(reqwest::Method::POST, "/projects", input)
            .await
    }

    pub async fn update_project(&self, id: DbId, patch: &ProjectPatch) -> Result<(), ClientError> {
        let ack: Ack = self
            .send_json(reqwest::Method::PUT, &format!("/projects/{id}"), patch)
            .await?;
        Self::acknowledged(ack)
    }

    pub async fn delete_project(&self, id: DbId) -> Result<(), ClientError> {
        let ack: Ack = self.delete_json(&format!("/projects/{id}")).await?;
        Self::acknowledged(ack)
    }

    // ---- tasks ----

    /// List tasks, optionally only those of one project.
    pub async fn list_tasks(&self, project_id: Option<DbId>) -> Result<Vec<Task>, ClientError> {
        let query: Vec<(&str, String)> = project_id
            .map(|id| ("projectId", id.to_string()))
            .into_iter()
            .collect();
        self.get_json("/tasks", &query).await
    }

    pub async fn get_task(&self, id: DbId) -> Result<Task, ClientError> {
        self.get_json(&format!("/tasks/{id}"), &[]).await
    }

    pub async fn create_task(&self, input: &NewTask) -> Result<Task, ClientError> {
        self.send_json(reqwest::Method::POST, "/tasks", input).await
    }

    pub async fn update_task(&self, id: DbId, patch: &TaskPatch) -> Result<(), ClientError> {
        let ack: Ack = self
            .send_json(reqwest::Method::PUT, &format!("/tasks/{id}"), patch)
            .await?;
        Self::acknowledged(ack)
    }

    pub async fn delete_task(&self, id: DbId) -> Result<(), ClientError> {
        let ack: Ack = self.delete_json(&format!("/tasks/{id}")).await?;
        Self::acknowledged(ack)
    }

    // ---- users ----

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.get_json("/users", &[]).await
    }

    pub async fn create_user(&self, input: &NewUser) -> Result<User, ClientError> {
        self.send_json(reqwest::Method::POST, "/users", input).await
    }

    pub async fn update_user(&self, id: DbId, patch: &UserPatch) -> Result<User, ClientError> {
        self.send_json(reqwest::Method::PUT, &format!("/users/{id}"), patch)
            .await
    }

    // ---- private helpers ----

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let response = self
            .request(reqwest::Method::GET, path)
            .query(query)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.request(method, path).json(body).send().await?;
        Self::parse_response(response).await
    }

    async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.request(reqwest::Method::DELETE, path).send().await?;
        Self::parse_response(response).await
    }

    /// Turn a non-2xx response into [`ClientError::Api`], reading the
    /// `{error, code}` body when there is one.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (body.code, body.error),
            Err(_) => ("UNKNOWN".to_string(), text),
        };
        tracing::debug!(status = status.as_u16(), %code, %message, "API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    fn acknowledged(ack: Ack) -> Result<(), ClientError> {
        if ack.success {
            Ok(())
        } else {
            Err(ClientError::NotAcknowledged)
        }
    }
}
