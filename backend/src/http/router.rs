//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Largest accepted request body; evaluations carry whole time series.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Time ranges
        .route("/time-range", get(handlers::resolve_time_range))
        .route("/time-range/options", get(handlers::list_time_ranges))
        .route("/time-range/custom", post(handlers::custom_time_range))
        // Alert evaluations
        .route("/evaluations/series", post(handlers::evaluation_series))
        .route("/evaluations/point-at", post(handlers::evaluation_point_at))
        // Dimension breakdowns
        .route("/breakdown/comparison", post(handlers::breakdown_comparison))
        .route("/breakdown/filters", post(handlers::breakdown_filters))
        .route("/baseline/plot-bands", get(handlers::baseline_plot_bands));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
