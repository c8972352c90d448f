//! Shared response bodies.

use serde::Serialize;

/// `{ "success": true }` acknowledgment returned by update and delete
/// endpoints instead of the affected record.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
