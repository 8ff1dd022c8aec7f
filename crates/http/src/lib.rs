//! HTTP server facade for BookShop with Axum, error handling, and OpenAPI support.

use anyhow::Context;
use axum::{routing::get, Router};

use bookshop_kernel::{settings::Settings, ModuleRegistry};

pub mod error;
pub mod extract;
pub mod router;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry.
///
/// Returns once the server has drained after a shutdown signal.
pub async fn start_server(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let address = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!("starting HTTP server on {}", address);

    let app = build_router(registry, settings);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to address {}", address))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> Router {
    let mut router_builder = RouterBuilder::new().route("/healthz", get(health_check));

    for module in registry.modules() {
        let module_name = module.name();
        tracing::info!(
            module = module_name,
            "mounting module routes under /api/{}",
            module_name
        );
        router_builder = router_builder.mount_module(module_name, module.routes());
    }

    router_builder
        .with_openapi(registry, &settings.catalog.application_name)
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms)
        .build()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
