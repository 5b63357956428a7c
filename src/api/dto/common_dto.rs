//! Shared DTO types used across endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed greeting returned by `GET /api/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GreetingResponse {
    /// Greeting text.
    pub message: String,
}

impl Default for GreetingResponse {
    fn default() -> Self {
        Self {
            message: "Hello World".to_string(),
        }
    }
}
