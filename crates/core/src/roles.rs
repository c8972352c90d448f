//! Roles and the capabilities they grant.
//!
//! The same table drives server-side enforcement in the API and the
//! advisory view gating in the client.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_CONTRIBUTOR: &str = "contributor";

pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MANAGER, ROLE_CONTRIBUTOR];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Contributor,
}

impl Role {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_MANAGER => Ok(Self::Manager),
            ROLE_CONTRIBUTOR => Ok(Self::Contributor),
            _ => Err(CoreError::Validation(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }

    /// Resolve the role carried by an identity token.
    ///
    /// Missing or unrecognized values fall back to [`Role::Contributor`],
    /// the least privileged role.
    pub fn from_claim(claim: Option<&str>) -> Self {
        claim
            .and_then(|s| Self::from_str_value(s).ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Manager => ROLE_MANAGER,
            Self::Contributor => ROLE_CONTRIBUTOR,
        }
    }

    pub fn capabilities(self) -> Capabilities {
        Capabilities::for_role(self)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a role may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// Create, update and delete projects.
    pub can_manage_projects: bool,
    pub can_delete_tasks: bool,
    /// Create users, change roles, activate and deactivate.
    pub can_manage_users: bool,
}

impl Capabilities {
    pub fn for_role(role: Role) -> Self {
        let elevated = matches!(role, Role::Admin | Role::Manager);
        Self {
            can_manage_projects: elevated,
            can_delete_tasks: elevated,
            can_manage_users: role == Role::Admin,
        }
    }
}
