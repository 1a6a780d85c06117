//! Query engine errors

use std::time::Duration;

use thiserror::Error;

/// Errors raised while validating, shaping or executing a list query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// Malformed pagination, filter or sort input.
    #[error("{0}")]
    Validation(String),

    /// Operator name outside the filter catalog.
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// Failure reported by the backing store, carrying its message verbatim.
    #[error("{0}")]
    Execution(String),

    /// The store round trip did not finish in time.
    #[error("Query timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl QueryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status this error maps to when it reaches a caller.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::UnsupportedOperator(_) => 400,
            Self::Execution(_) => 500,
            Self::Timeout(_) => 504,
        }
    }

    /// Whether the caller supplied bad input (as opposed to a store failure).
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        assert_eq!(QueryError::validation("bad page").status_code(), 400);
        assert_eq!(
            QueryError::UnsupportedOperator("between".into()).status_code(),
            400
        );
        assert!(QueryError::validation("x").is_client_error());
    }

    #[test]
    fn store_failures_keep_their_message() {
        let err = QueryError::Execution("connection refused".into());
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.status_code(), 500);
        assert!(!err.is_client_error());
    }

    #[test]
    fn timeout_is_distinguishable() {
        let err = QueryError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.status_code(), 504);
        assert_eq!(err.to_string(), "Query timed out after 1500ms");
    }
}
