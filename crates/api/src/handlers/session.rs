//! Handler for `/me`: who the caller is and what they may do.

use axum::Json;
use serde::Serialize;
use taskboard_core::roles::{Capabilities, Role};

use crate::middleware::auth::AuthUser;

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub subject: String,
    pub email: Option<String>,
    pub role: Role,
    pub capabilities: Capabilities,
}

/// GET /me
pub async fn me(user: AuthUser) -> Json<SessionView> {
    Json(SessionView {
        capabilities: user.role.capabilities(),
        subject: user.subject,
        email: user.email,
        role: user.role,
    })
}
