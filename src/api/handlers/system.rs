//! System endpoints: greeting and health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::GreetingResponse;
use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` when the store answers, `degraded` otherwise.
    pub status: String,
    /// `up` or `down`.
    pub store: String,
    /// Time of the check (RFC 3339).
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}

/// `GET /api/`: Fixed greeting.
#[utoipa::path(
    get,
    path = "/api/",
    tag = "System",
    summary = "Greeting",
    description = "Returns a fixed greeting. No side effects.",
    responses(
        (status = 200, description = "Greeting", body = GreetingResponse),
    )
)]
pub async fn root_handler() -> Json<GreetingResponse> {
    Json(GreetingResponse::default())
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Pings the document store and reports service health, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Document store unreachable", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (status, store, code) = match state.store.ping().await {
        Ok(()) => ("healthy", "up", StatusCode::OK),
        Err(e) => {
            tracing::warn!(error = %e, "health check: document store unreachable");
            ("degraded", "down", StatusCode::SERVICE_UNAVAILABLE)
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            store: store.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api", get(root_handler))
        .route("/api/", get(root_handler))
        .route("/health", get(health_handler))
}
