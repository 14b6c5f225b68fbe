//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use super::config::ServerConfig;
use super::handlers;
use super::state::AppState;

/// Prediction bodies are a handful of fields.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// CORS policy: any origin when none are configured, otherwise the listed
/// ones. Origins that are not valid header values are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Skipping invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    let allow_origin = if allowed.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the main application router with permissive CORS.
pub fn create_router(state: AppState) -> Router {
    create_router_with_config(state, &ServerConfig::default())
}

/// Create the main application router with all routes and middleware.
pub fn create_router_with_config(state: AppState, config: &ServerConfig) -> Router {
    let api_v1 = Router::new()
        .route("/predict-delay", post(handlers::predict_delay))
        .route("/flights", get(handlers::list_flights))
        .route("/flights/{id}", get(handlers::get_flight))
        .route("/airlines", get(handlers::list_airlines))
        .route("/airports", get(handlers::list_airports))
        .route("/routes", get(handlers::list_routes))
        .route("/analytics", get(handlers::get_analytics))
        .route("/reports", get(handlers::get_report));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
        .with_state(state)
}
