//! HTTP server facade for LIBRIS with Axum, error handling, and server-side
//! page rendering.

use anyhow::Context;
use axum::{extract::Request, http::HeaderValue, routing::get, Router};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::{Timestamp, Uuid};

use libris_kernel::ModuleRegistry;

pub mod error;
pub mod presenter;
pub mod router;

pub use error::AppError;
pub use presenter::Presenter;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry. `root` carries the
/// application's routes that live outside any module mount (home page,
/// top-level redirect).
pub async fn start_server(
    registry: &ModuleRegistry,
    settings: &libris_kernel::settings::Settings,
    root: Router,
) -> anyhow::Result<()> {
    tracing::info!(
        "starting HTTP server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    let app = build_router(registry, settings, root);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.server.host, settings.server.port))
            .await
            .context("failed to bind to address")?;

    tracing::info!(
        "HTTP server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with all module routes mounted
fn build_router(
    registry: &ModuleRegistry,
    settings: &libris_kernel::settings::Settings,
    root: Router,
) -> Router {
    let mut router_builder = RouterBuilder::new();

    // Add global middlewares
    router_builder = router_builder
        .with_tracing()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms);

    // Add health check route
    router_builder = router_builder.route("/healthz", get(health_check));

    // Mount module routes
    for module in registry.modules() {
        let module_name = module.name();
        let module_router = module.routes();

        tracing::info!(
            module = module_name,
            "mounting module routes under /catalog/{}",
            module_name
        );
        router_builder = router_builder.mount_module(module_name, module_router);
    }

    router_builder.merge(root).build()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// Request ID generator for tracing
#[derive(Clone)]
pub(crate) struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use libris_kernel::settings::Settings;
    use libris_kernel::Module;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct PingModule;

    impl Module for PingModule {
        fn name(&self) -> &'static str {
            "ping"
        }

        fn routes(&self) -> Router {
            Router::new().route("/", get(|| async { "pong" }))
        }
    }

    #[tokio::test]
    async fn build_router_exposes_health_and_module_routes() {
        let mut registry = ModuleRegistry::new();
        registry.register_custom(Arc::new(PingModule));
        let settings = Settings::default();

        let router = build_router(&registry, &settings, Router::new());

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/catalog/ping/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
