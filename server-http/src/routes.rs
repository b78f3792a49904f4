use crate::handlers;
use crate::state::AppState;
use axum::{http::HeaderValue, http::Method, routing::get, Router};
use shared::config::Config;
use tower::Layer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Build and configure the application router
pub fn build_router(state: AppState, config: &Config) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Price data
        .route("/api/price", get(handlers::get_price))
        // Mock insights
        .route("/api/sentiment", get(handlers::get_sentiment))
        .route("/api/wisdom", get(handlers::get_wisdom))
        // Middleware
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router wrapped so `/health/` resolves like `/health`. Path normalization
/// has to run before routing, hence outside the router.
pub fn build_app(state: AppState, config: &Config) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, config))
}

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods([Method::GET, Method::HEAD, Method::OPTIONS]);

    if config.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins = config
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();

    cors.allow_origin(origins)
}
