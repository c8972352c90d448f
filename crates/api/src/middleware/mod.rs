//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Verified caller identity from a Bearer token.
//! - [`rbac::RequireManager`] -- Requires `manager` or `admin`.
//! - [`rbac::RequireAdmin`] -- Requires `admin`.

pub mod auth;
pub mod rbac;
