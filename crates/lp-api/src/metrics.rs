//! Prometheus metrics for request rates and latencies.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{Gauge, counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Label for requests that matched no route.
pub const UNMATCHED_PATH: &str = "unmatched";

/// Middleware recording request count, latency and in-flight requests.
///
/// Attach with `route_layer` so the matched route template is available, and wrap the
/// fallback with it; requests without a matched route share the [`UNMATCHED_PATH`] label.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = route_label(&req);

    let in_flight = InFlight::start(gauge!(
        "http_requests_in_flight",
        "method" => method.clone(),
        "path" => path.clone()
    ));

    let response = next.run(req).await;

    drop(in_flight);

    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());

    response
}

/// Route template such as `/api/words/{id}`, never the raw request path.
fn route_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map_or_else(|| UNMATCHED_PATH.to_string(), |path| path.as_str().to_string())
}

/// Holds one unit of the in-flight gauge until dropped, including when the request
/// future is cancelled.
struct InFlight(Gauge);

impl InFlight {
    fn start(gauge: Gauge) -> Self {
        gauge.increment(1.0);
        Self(gauge)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.decrement(1.0);
    }
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        handler::Handler,
        http::{HeaderValue, Request},
        middleware::{self, Next},
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;

    async fn echo_label(req: Request<Body>, next: Next) -> Response {
        let label = route_label(&req);
        let mut response = next.run(req).await;
        response.headers_mut().insert(
            "x-route-label",
            HeaderValue::from_str(&label).unwrap(),
        );
        response
    }

    async fn not_found() -> StatusCode {
        StatusCode::NOT_FOUND
    }

    async fn label_for(app: &Router, uri: &str) -> String {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.headers()["x-route-label"]
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_route_label() {
        let api = Router::new()
            .route("/words/{id}", get(|| async { "word" }))
            .route("/groups/{id}/words", get(|| async { "words" }));
        let app = Router::new()
            .nest("/api", api)
            .route_layer(middleware::from_fn(echo_label))
            .fallback(not_found.layer(middleware::from_fn(echo_label)));

        assert_eq!(label_for(&app, "/api/words/1").await, "/api/words/{id}");
        assert_eq!(label_for(&app, "/api/words/abc").await, "/api/words/{id}");
        assert_eq!(
            label_for(&app, "/api/groups/12/words").await,
            "/api/groups/{id}/words"
        );
        assert_eq!(label_for(&app, "/api/abc").await, UNMATCHED_PATH);
        assert_eq!(label_for(&app, "/wp-login.php").await, UNMATCHED_PATH);
    }

    #[test]
    fn test_in_flight_released_on_drop() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            let first = InFlight::start(gauge!("http_requests_in_flight", "path" => "/health"));
            let second = InFlight::start(gauge!("http_requests_in_flight", "path" => "/health"));
            assert!(handle.render().contains(r#"http_requests_in_flight{path="/health"} 2"#));

            drop(first);
            drop(second);
        });

        assert!(handle.render().contains(r#"http_requests_in_flight{path="/health"} 0"#));
    }
}
