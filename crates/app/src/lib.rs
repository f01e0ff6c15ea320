//! Filmtrack application composition root
//!
//! Composes the domain routers and the shared HTTP middleware into a single
//! application.

use axum::{http::HeaderValue, Router};
use filmtrack_common::Config;
use filmtrack_projects::{ProjectStore, ProjectStoreFactory, ProjectsState};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Largest request body accepted, comfortably above a maximal insight
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Create the main application router, building the store from configuration
pub async fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    let store = ProjectStoreFactory::create(config).await?;
    Ok(router_with_store(store))
}

/// Create the router around an already constructed store
pub fn router_with_store(store: Arc<dyn ProjectStore>) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async {
                concat!("Filmtrack API v", env!("CARGO_PKG_VERSION"))
            }),
        )
        .merge(filmtrack_projects::routes().with_state(ProjectsState::new(store)))
}

/// Wrap the router in the shared HTTP middleware: tracing outermost, then
/// CORS, then the request body limit
pub fn apply_middleware(router: Router, config: &Config) -> Router {
    router
        .layer(body_limit_layer())
        .layer(build_cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS layer from a comma separated origin list; `*` allows any origin
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.trim() == "*" {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
