//! Prometheus metrics for the rooms service
//!
//! Two families share one outcome vocabulary: HTTP requests, recorded by
//! [`http_metrics_middleware`], and list queries, recorded by the database
//! executor through [`record_list_query`]. A 504 on the wire and a query
//! timeout therefore land under the same `outcome="timeout"` label.

pub mod handlers;
pub mod middleware;

use std::time::Duration;

pub use handlers::{describe_metrics, prometheus_metrics, MetricsState};
pub use middleware::http_metrics_middleware;

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION: &str = "http_request_duration_seconds";
pub const LIST_QUERIES_TOTAL: &str = "list_queries_total";
pub const LIST_QUERY_DURATION: &str = "list_query_duration_seconds";

/// How a request or list query ended, as a label value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Rejected,
    Failed,
    Timeout,
}

impl Outcome {
    /// Classifies by status code, which is how both HTTP responses and
    /// query errors (`QueryError::status_code`) report their result.
    pub fn from_status(status: u16) -> Self {
        match status {
            504 => Self::Timeout,
            400..=499 => Self::Rejected,
            500..=599 => Self::Failed,
            _ => Self::Ok,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Rejected => "rejected",
            Self::Failed => "error",
            Self::Timeout => "timeout",
        }
    }
}

/// Records one list query against `table`.
pub fn record_list_query(table: &str, elapsed: Duration, outcome: Outcome) {
    metrics::counter!(
        LIST_QUERIES_TOTAL,
        "table" => table.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
    metrics::histogram!(LIST_QUERY_DURATION, "table" => table.to_string())
        .record(elapsed.as_secs_f64());
}
