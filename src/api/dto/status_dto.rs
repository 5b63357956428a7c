//! Status check DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for `POST /api/status`.
///
/// Only `client_name` is read; `id` and `timestamp` are always assigned by
/// the server and any such fields in the body are ignored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StatusCheckCreate {
    /// Name of the reporting client.
    pub client_name: String,
}
