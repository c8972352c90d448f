//! Project defaults.
//!
//! Project status is free text; only its default is fixed.

/// Status assigned to a project created without one.
pub const DEFAULT_PROJECT_STATUS: &str = "active";

/// Description stored when a project or task is created without one.
pub const DEFAULT_DESCRIPTION: &str = "";
