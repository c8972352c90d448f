//! Typed client for the task board API.
//!
//! [`ApiClient`] wraps the HTTP endpoints, [`Board`] holds the client-side
//! copy of projects, tasks and users, and [`Session`] ties the two together
//! so every successful call lands as exactly one [`Mutation`].

pub mod api;
pub mod models;
pub mod session;
pub mod store;

pub use api::{ApiClient, ClientError};
pub use session::Session;
pub use store::{Board, Mutation, StatusFilter};
