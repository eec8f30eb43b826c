/// API route handlers
///
/// Each submodule maps 1:1 to a resource exposed by the transport shell:
///
/// - `index`: Route discovery document at /
/// - `health`: Liveness and database connectivity at /health
/// - `accounts`: Account CRUD at /users
/// - `tasks`: Task CRUD and filtered listings at /tasks
/// - `stats`: Summary report at /stats

pub mod accounts;
pub mod health;
pub mod index;
pub mod stats;
pub mod tasks;

use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Confirmation body returned by delete operations
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// Fallback handler for unmatched routes
pub async fn endpoint_not_found() -> ApiError {
    ApiError::NotFound("endpoint not found".to_string())
}
