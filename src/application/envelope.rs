//! Result envelope
//!
//! Every list endpoint answers with the same shape:
//! success → `{"success": true, "statusCode": 200, "message": "...", "data": {...}}`,
//! failure → `{"success": false, "statusCode": 500, "message": "..."}`.
//! The message is chosen by the caller; the envelope only carries it.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::query::QueryError;
use crate::support::errors::AppError;

/// Errors that can be rendered into a failure envelope.
///
/// Errors without a declared status map to 500.
pub trait ResponseError: Display {
    fn http_status(&self) -> u16 {
        500
    }
}

impl ResponseError for QueryError {
    fn http_status(&self) -> u16 {
        self.status_code()
    }
}

impl ResponseError for AppError {
    fn http_status(&self) -> u16 {
        match self {
            AppError::Query(e) => e.status_code(),
            AppError::Infra(_) => 500,
        }
    }
}

/// Uniform response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope<T> {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    /// Payload, absent on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Request path the envelope answers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl<T> ResultEnvelope<T> {
    pub fn success(data: T, status_code: u16, message: impl Into<String>) -> Self {
        Self {
            success: true,
            status_code,
            message: message.into(),
            data: Some(data),
            path: None,
        }
    }

    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::success(data, 200, message)
    }

    pub fn failure<E: ResponseError + ?Sized>(error: &E) -> Self {
        Self::error(error.http_status(), error.to_string())
    }

    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            status_code,
            message: message.into(),
            data: None,
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn map_data<U, F>(self, f: F) -> ResultEnvelope<U>
    where
        F: FnOnce(T) -> U,
    {
        ResultEnvelope {
            success: self.success,
            status_code: self.status_code,
            message: self.message,
            data: self.data.map(f),
            path: self.path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct Opaque;

    impl Display for Opaque {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("Something went wrong")
        }
    }

    impl ResponseError for Opaque {}

    #[test]
    fn success_carries_data_and_message() {
        let envelope = ResultEnvelope::success(vec![1, 2], 200, "Rooms retrieved successfully");
        assert!(envelope.success);
        assert_eq!(envelope.data, Some(vec![1, 2]));

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "statusCode": 200,
                "message": "Rooms retrieved successfully",
                "data": [1, 2]
            })
        );
    }

    #[test]
    fn undeclared_errors_map_to_500() {
        let envelope = ResultEnvelope::<()>::failure(&Opaque);
        assert!(!envelope.success);
        assert_eq!(envelope.status_code, 500);
        assert_eq!(envelope.message, "Something went wrong");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn declared_status_is_used() {
        let envelope =
            ResultEnvelope::<()>::failure(&QueryError::UnsupportedOperator("between".into()));
        assert_eq!(envelope.status_code, 400);
        assert_eq!(envelope.message, "Unsupported operator: between");

        let envelope = ResultEnvelope::<()>::failure(&QueryError::Timeout(Duration::from_secs(2)));
        assert_eq!(envelope.status_code, 504);
    }

    #[test]
    fn app_errors_keep_query_status() {
        let err = AppError::from(QueryError::validation("bad page"));
        assert_eq!(ResultEnvelope::<()>::failure(&err).status_code, 400);

        let err = AppError::from(std::io::Error::other("disk full"));
        let envelope = ResultEnvelope::<()>::failure(&err);
        assert_eq!(envelope.status_code, 500);
        assert_eq!(envelope.message, "I/O error: disk full");
    }

    #[test]
    fn failure_omits_data_on_the_wire() {
        let envelope = ResultEnvelope::<()>::error(500, "boom").with_path("/api/v1/rooms");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "statusCode": 500,
                "message": "boom",
                "path": "/api/v1/rooms"
            })
        );
    }

    #[test]
    fn map_data_keeps_envelope_fields() {
        let envelope = ResultEnvelope::ok(2, "fine").with_path("/x").map_data(|n| n * 10);
        assert_eq!(envelope.data, Some(20));
        assert_eq!(envelope.path.as_deref(), Some("/x"));
        assert_eq!(envelope.status_code, 200);
    }
}
