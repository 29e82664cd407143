use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, ServerConfig};
use crate::middleware;
use crate::registry::StoreRegistry;
use crate::routes;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the Axum router: the resource index plus the five list routes,
/// which share a resolving middleware.
pub fn build_router(registry: Arc<StoreRegistry>) -> Router {
    let resources = Router::<Arc<StoreRegistry>>::new()
        .route(
            "/api/{resource}",
            get(routes::items::list_items).post(routes::items::append_item),
        )
        .route(
            "/api/{resource}/{id}",
            get(routes::items::get_item)
                .put(routes::items::replace_item)
                .delete(routes::items::remove_item),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            registry.clone(),
            middleware::resolve_resource,
        ));

    Router::new()
        .route("/api", get(routes::root::get_index))
        .merge(resources)
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}

/// Validate the config, create an empty store per resource and serve.
pub async fn run_server(config: &ServerConfig) -> Result<(), ServerError> {
    config.validate()?;
    let registry = Arc::new(StoreRegistry::from_config(config));
    run_server_with_registry(registry, &config.host, config.port).await
}

/// Start the server with a pre-built registry.
pub async fn run_server_with_registry(
    registry: Arc<StoreRegistry>,
    host: &str,
    port: u16,
) -> Result<(), ServerError> {
    let app = build_router(registry);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting Storefront server on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
