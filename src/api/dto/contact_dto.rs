//! Contact form DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgement returned by `POST /api/contact`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    /// Always `true` on a 200 response.
    pub success: bool,
    /// Message to show the visitor.
    pub message: String,
}

impl ContactResponse {
    /// The acknowledgement sent for every stored submission.
    #[must_use]
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: "Thank you for contacting us. We'll get back to you soon.".to_string(),
        }
    }
}
