//! Domain error type shared by every layer above the core.

use crate::types::DbId;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A required field was absent or blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
