//! Status check handlers: create and list.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::StatusCheckCreate;
use crate::api::extract::AppJson;
use crate::app_state::AppState;
use crate::domain::StatusCheck;
use crate::error::{ApiError, ErrorResponse};

/// `POST /status`: Record a status check.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] on a malformed body and
/// [`ApiError::Persistence`] if the store write fails.
#[utoipa::path(
    post,
    path = "/api/status",
    tag = "Status",
    summary = "Record a status check",
    description = "Stores a status check for the given client. The server assigns `id` and `timestamp`.",
    request_body = StatusCheckCreate,
    responses(
        (status = 200, description = "Status check recorded", body = StatusCheck),
        (status = 422, description = "Body does not match the schema", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn create_status_check(
    State(state): State<AppState>,
    AppJson(req): AppJson<StatusCheckCreate>,
) -> Result<Json<StatusCheck>, ApiError> {
    let check = state.status_service.create(req.client_name).await?;
    Ok(Json(check))
}

/// `GET /status`: List recorded status checks.
///
/// # Errors
///
/// Returns [`ApiError::Persistence`] if the read fails.
#[utoipa::path(
    get,
    path = "/api/status",
    tag = "Status",
    summary = "List status checks",
    description = "Returns up to 1000 status checks in store order.",
    responses(
        (status = 200, description = "Status checks", body = Vec<StatusCheck>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, ApiError> {
    let checks = state.status_service.list().await?;
    Ok(Json(checks))
}

/// Status check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/status", post(create_status_check).get(list_status_checks))
}
