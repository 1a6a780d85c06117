//! Per-route HTTP metrics

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

use super::{Outcome, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION};

const UNMATCHED: &str = "unmatched";

/// Records [`HTTP_REQUESTS_TOTAL`] labelled `method`, `route` and `outcome`,
/// and [`HTTP_REQUEST_DURATION`] labelled `method` and `route`.
///
/// `route` is the route template (`/api/v1/rooms`), never the raw URI, so
/// `filters` and `sort` payloads cannot inflate label cardinality.
pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().as_str().to_owned();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED, MatchedPath::as_str)
        .to_owned();

    let started = Instant::now();
    let response = next.run(request).await;
    let outcome = Outcome::from_status(response.status().as_u16());

    metrics::counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.clone(),
        "route" => route.clone(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
    metrics::histogram!(HTTP_REQUEST_DURATION, "method" => method, "route" => route)
        .record(started.elapsed().as_secs_f64());

    response
}
