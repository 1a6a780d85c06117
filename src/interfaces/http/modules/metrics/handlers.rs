//! `GET /metrics` and metric descriptions

use axum::{extract::State, http::header, response::IntoResponse};
use metrics::Unit;
use metrics_exporter_prometheus::PrometheusHandle;

use super::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION, LIST_QUERIES_TOTAL, LIST_QUERY_DURATION};

const PROMETHEUS_TEXT: &str = "text/plain; version=0.0.4; charset=utf-8";

#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Registers HELP text and units for every series the service emits.
/// Call after the recorder is installed.
pub fn describe_metrics() {
    metrics::describe_counter!(
        HTTP_REQUESTS_TOTAL,
        "HTTP requests by method, route and outcome"
    );
    metrics::describe_histogram!(
        HTTP_REQUEST_DURATION,
        Unit::Seconds,
        "HTTP request latency by method and route"
    );
    metrics::describe_counter!(
        LIST_QUERIES_TOTAL,
        "Paginated list queries by table and outcome"
    );
    metrics::describe_histogram!(
        LIST_QUERY_DURATION,
        Unit::Seconds,
        "Count plus page fetch latency by table"
    );
}

/// Prometheus scrape endpoint
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    let body = state.handle.render();
    ([(header::CONTENT_TYPE, PROMETHEUS_TEXT)], body)
}
