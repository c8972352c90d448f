//! Domain types and pure rules for the task board.
//!
//! Nothing in this crate performs I/O: enumerations, validation, the
//! overdue rule, dashboard aggregation and role capabilities all operate on
//! values handed in by the caller.

pub mod dashboard;
pub mod error;
pub mod project;
pub mod roles;
pub mod task;
pub mod types;
pub mod validation;
