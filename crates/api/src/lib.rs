//! Task board HTTP API.
//!
//! Exposes config, state, error handling, auth extractors and routes so the
//! binary entrypoint and the integration tests build the exact same app.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
