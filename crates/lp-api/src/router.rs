use axum::{
    Json, Router,
    handler::Handler,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{
    config::ApiConfig,
    metrics::{metrics_handler, track_metrics},
    middleware::{cors::create_cors_layer, request_id::request_id_middleware},
    state::ApiState,
    v1,
};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", v1::routes())
        .fallback(handler_404)
}

/// The served application: API routes, `/metrics` and the middleware stack.
pub fn app(state: ApiState, config: &ApiConfig, metrics_handle: PrometheusHandle) -> Router {
    let metrics_app = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    with_middleware(router().with_state(state).merge(metrics_app), config)
}

/// Wrap `routes` in the request pipeline, outermost last: request id, metrics, tracing,
/// CORS and the per-request deadline answered with 408.
pub fn with_middleware(routes: Router, config: &ApiConfig) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    routes
        .route_layer(middleware::from_fn(track_metrics))
        .fallback(handler_404.layer(middleware::from_fn(track_metrics)))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        .layer(create_cors_layer(config.parsed_allowed_origins()))
        .layer(trace_layer)
        .layer(middleware::from_fn(request_id_middleware))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "The requested resource was not found" })),
    )
}
