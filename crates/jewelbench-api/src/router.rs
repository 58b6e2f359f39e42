//! Route definitions for the JewelBench HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Room for multipart boundaries and the material field on top of the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = usize::try_from(state.config.storage.max_upload_size_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(material_routes())
        .merge(valuation_routes())
        .merge(export_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(build_compression_layer())
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// Liveness and version
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Material table
fn material_routes() -> Router<AppState> {
    Router::new().route("/materials", get(handlers::materials::list_materials))
}

/// Upload valuation and volume quotes
fn valuation_routes() -> Router<AppState> {
    Router::new()
        .route("/valuations", post(handlers::valuation::evaluate_upload))
        .route("/valuations/quote", post(handlers::valuation::quote_volume))
}

/// CAD export downloads
fn export_routes() -> Router<AppState> {
    Router::new().route("/exports", post(handlers::export::export_upload))
}
