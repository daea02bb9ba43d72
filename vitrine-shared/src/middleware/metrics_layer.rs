use std::time::Instant;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, histogram};

/// Which surface a route belongs to, so back-office traffic can be told apart.
fn surface(route: &str) -> &'static str {
    if route.starts_with("/api/admin") {
        "admin"
    } else if route.starts_with("/api") {
        "public"
    } else {
        "ops"
    }
}

/// Per-request counter and latency histogram, labelled by route template.
pub async fn metrics_middleware(matched_path: Option<MatchedPath>, req: Request<Body>, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().to_string();
    // Unmatched paths share one label so stray URLs cannot blow up cardinality.
    let route = matched_path.map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());
    let area = surface(&route);

    let response = next.run(req).await;

    let labels = [
        ("method", method),
        ("route", route),
        ("area", area.to_string()),
        ("status", response.status().as_u16().to_string()),
    ];
    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(started.elapsed().as_secs_f64());

    response
}

/// Outcome of a contact unlock attempt: `unlocked`, `declined`, `invalid` or `repeat`.
pub fn record_unlock(outcome: &'static str) {
    counter!("vitrine_unlocks_total", "outcome" => outcome).increment(1);
}

/// Install the global Prometheus recorder.
pub fn init_metrics() -> anyhow::Result<metrics_exporter_prometheus::PrometheusHandle> {
    let handle = metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;
    Ok(handle)
}
