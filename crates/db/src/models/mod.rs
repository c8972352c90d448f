//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` struct matching the row as clients see it
//! - A create DTO holding already-validated input
//! - An update DTO (all `Option` fields) where `None` means "leave unchanged"

pub mod project;
pub mod task;
pub mod user;
