use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Human-readable outcome of a character operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub message: String,
}

impl OperationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Failure message in the form `Not Found[404]: Character not found`.
    pub fn failure(status: StatusCode, description: &str) -> Self {
        Self {
            message: format!(
                "{}[{}]: {}",
                status.canonical_reason().unwrap_or("Unknown"),
                status.as_u16(),
                description
            ),
        }
    }
}
