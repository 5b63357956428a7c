//! OpenAPI document assembled from the handler annotations.

use axum::Router;
use utoipa::OpenApi;

use crate::api::handlers::{contact, status, system};

/// Path the OpenAPI JSON document is served from.
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// OpenAPI description of every public endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "viridata-backend",
        description = "Status checks and contact form submissions for the Viridata site."
    ),
    paths(
        system::root_handler,
        system::health_handler,
        status::create_status_check,
        status::list_status_checks,
        contact::submit_contact_form,
    ),
    tags(
        (name = "System", description = "Greeting and health"),
        (name = "Status", description = "Status check logging"),
        (name = "Contact", description = "Contact form submissions"),
    )
)]
pub struct ApiDoc;

/// Routes serving the OpenAPI document, plus Swagger UI at `/docs` when
/// the `swagger-ui` feature is enabled.
#[cfg(feature = "swagger-ui")]
pub fn router() -> Router {
    Router::new()
        .merge(utoipa_swagger_ui::SwaggerUi::new("/docs").url(OPENAPI_PATH, ApiDoc::openapi()))
}

/// Routes serving the OpenAPI document.
#[cfg(not(feature = "swagger-ui"))]
pub fn router() -> Router {
    use axum::Json;
    use axum::routing::get;

    Router::new().route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in ["/api/", "/health", "/api/status", "/api/contact"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
