//! Task status and priority enumerations.
//!
//! Both are closed sets. The API validates incoming values against them and
//! the schema repeats the same sets as `CHECK` constraints.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_DONE: &str = "done";

/// All valid task status strings, in workflow order.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_IN_PROGRESS, STATUS_DONE];

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";

/// All valid task priority strings, lowest first.
pub const VALID_PRIORITIES: &[&str] = &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH];

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Where a task sits in its (three-step) lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    #[serde(alias = "in-progress")]
    InProgress,
    Done,
}

impl TaskStatus {
    /// Parse a stored or submitted status value.
    ///
    /// Accepts the hyphenated `in-progress` spelling as well.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_IN_PROGRESS | "in-progress" => Ok(Self::InProgress),
            STATUS_DONE => Ok(Self::Done),
            _ => Err(CoreError::Validation(format!(
                "Invalid task status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Done => STATUS_DONE,
        }
    }

    /// The status a one-click toggle moves to.
    ///
    /// `Done` goes back to `Pending`; everything else goes to `Done`. The
    /// toggle never lands on `InProgress`.
    pub fn toggled(self) -> Self {
        match self {
            Self::Done => Self::Pending,
            Self::Pending | Self::InProgress => Self::Done,
        }
    }

    pub fn is_done(self) -> bool {
        self == Self::Done
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            PRIORITY_LOW => Ok(Self::Low),
            PRIORITY_MEDIUM => Ok(Self::Medium),
            PRIORITY_HIGH => Ok(Self::High),
            _ => Err(CoreError::Validation(format!(
                "Invalid task priority '{s}'. Must be one of: {}",
                VALID_PRIORITIES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => PRIORITY_LOW,
            Self::Medium => PRIORITY_MEDIUM,
            Self::High => PRIORITY_HIGH,
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
