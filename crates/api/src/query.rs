//! Query-string parameter types.

use serde::Deserialize;
use taskboard_core::error::CoreError;
use taskboard_core::types::DbId;

/// `GET /tasks?projectId=`.
///
/// The id arrives as text so an empty `?projectId=` can mean "no filter"
/// instead of failing to parse.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListParams {
    pub project_id: Option<String>,
}

impl TaskListParams {
    pub fn project_id(&self) -> Result<Option<DbId>, CoreError> {
        match self.project_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| {
                CoreError::Validation(format!("projectId must be an integer, got '{raw}'"))
            }),
        }
    }
}

/// `GET /dashboard?today=`. Defaults to the server's UTC date.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub today: Option<String>,
}
