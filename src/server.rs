//! Process lifecycle: app assembly, listener, and graceful shutdown.
//!
//! The store is opened once before the listener starts and closed once
//! after the server has drained, whatever the reason it stopped.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::http::HeaderValue;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::{CorsOrigins, ServerConfig};
use crate::notify::ContactNotifier;
use crate::persistence;

/// Builds the CORS layer for `origins`.
///
/// Methods and headers are unrestricted and credentials are allowed. Since
/// browsers reject `*` together with credentials, "any origin" echoes the
/// request's own origin back.
#[must_use]
pub fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::mirror_request(),
        CorsOrigins::List(list) => AllowOrigin::list(list.iter().filter_map(|origin| {
            match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            }
        })),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Assembles the full application: API routes, OpenAPI docs, request
/// tracing, and CORS.
pub fn build_app(state: AppState, origins: &CorsOrigins) -> Router {
    api::build_router()
        .with_state(state)
        .merge(api::docs::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(origins))
}

/// Runs the server until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the store cannot be opened, the listener cannot be
/// bound, or the server fails while running.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let store = persistence::connect(&config.database)
        .await
        .context("failed to open document store")?;

    let notifier = ContactNotifier::from_config(config.smtp.clone());
    if !config.smtp.has_credentials() {
        tracing::warn!("SMTP credentials not configured; contact emails are disabled");
    }

    let state = AppState::new(Arc::clone(&store), notifier);
    let app = build_app(state, &config.cors_origins);

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await;
    served.context("server error")?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::config::SmtpConfig;
    use crate::persistence::MemoryStore;

    fn app(origins: CorsOrigins) -> Router {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            ContactNotifier::from_config(SmtpConfig::default()),
        );
        build_app(state, &origins)
    }

    fn preflight(origin: &str) -> Request<Body> {
        let Ok(req) = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/contact")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
        else {
            panic!("valid request");
        };
        req
    }

    #[tokio::test]
    async fn any_origin_is_mirrored_with_credentials() {
        let Ok(response) = app(CorsOrigins::Any)
            .oneshot(preflight("https://viridata.eu"))
            .await
        else {
            panic!("router is infallible");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("https://viridata.eu"))
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            Some(&HeaderValue::from_static("true"))
        );
    }

    #[tokio::test]
    async fn listed_origins_exclude_others() {
        let origins = CorsOrigins::List(vec!["https://viridata.eu".to_string()]);

        let Ok(allowed) = app(origins.clone())
            .oneshot(preflight("https://viridata.eu"))
            .await
        else {
            panic!("router is infallible");
        };
        assert!(
            allowed
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );

        let Ok(denied) = app(origins).oneshot(preflight("https://evil.example")).await else {
            panic!("router is infallible");
        };
        assert!(
            !denied
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
    }

    #[tokio::test]
    async fn docs_are_served() {
        let Ok(req) = Request::builder()
            .uri(api::docs::OPENAPI_PATH)
            .body(Body::empty())
        else {
            panic!("valid request");
        };
        let Ok(response) = app(CorsOrigins::Any).oneshot(req).await else {
            panic!("router is infallible");
        };
        assert_eq!(response.status(), StatusCode::OK);
    }
}
