use crate::errors::handlers::not_found;
use crate::health::health_handler;
use crate::middleware::security_headers;
use crate::shutdown::{shutdown_signal, ShutdownCoordinator};
use axum::routing::get;
use axum::{middleware, Router};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};
use utoipa::OpenApi;

/// API-documentation routes: the OpenAPI JSON document plus the four UIs
/// (Swagger UI, ReDoc, RapiDoc, Scalar), all rendering the same spec.
fn docs_router<T: OpenApi + 'static>() -> Router {
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
}

/// Assemble the application router with cross-cutting concerns.
///
/// The provided routes must already have their state applied (domain routers
/// own their state). This adds:
/// - API documentation endpoints
/// - the `/health` liveness endpoint
/// - request tracing and security headers
/// - a JSON-bodied 404 fallback
pub async fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let router = docs_router::<T>()
        .route("/health", get(health_handler))
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers));

    Ok(router)
}

/// Serve the router with basic graceful shutdown.
///
/// # Errors
/// Fails if the listener cannot bind or the server errors while running.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e))
}

/// Serve the router with coordinated shutdown and bounded cleanup.
///
/// On SIGINT/SIGTERM the server stops accepting connections, drains in-flight
/// requests, and runs `cleanup` (closing database pools and the like) with
/// `shutdown_timeout` as an upper bound.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_coordinator = coordinator.clone();
    let cleanup_handle = tokio::spawn(async move {
        let mut shutdown_rx = cleanup_coordinator.subscribe();
        shutdown_rx.recv().await.ok();

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        if tokio::time::timeout(shutdown_timeout, cleanup).await.is_err() {
            tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            );
        } else {
            info!("Cleanup completed successfully");
        }
    });

    let signal_coordinator = coordinator.clone();
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { signal_coordinator.wait_for_signal().await })
        .await
        .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e));

    cleanup_handle.await.ok();

    serve_result
}
