//! Validated query-string extractor for Axum
//!
//! `ValidatedQuery<T>` works like `axum::extract::Query<T>`, but additionally
//! runs `validator::Validate::validate()` on the deserialized value. Both
//! failure kinds answer with a 400 error envelope carrying the request path.

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, OriginalUri, Query};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::application::envelope::ResultEnvelope;

/// An extractor that deserializes the query string and validates it.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct Params {
///     #[validate(range(min = 1))]
///     page: u32,
/// }
///
/// async fn handler(ValidatedQuery(params): ValidatedQuery<Params>) {
///     // `params` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedQuery<T>(pub T);

/// Error type for `ValidatedQuery` extraction failures.
pub enum ValidatedQueryRejection {
    /// Query string did not deserialize.
    QueryError {
        rejection: QueryRejection,
        path: String,
    },
    /// Validation failed.
    ValidationError {
        errors: validator::ValidationErrors,
        path: String,
    },
}

impl IntoResponse for ValidatedQueryRejection {
    fn into_response(self) -> Response {
        match self {
            Self::QueryError { rejection, path } => {
                let message = format!("Invalid query: {}", rejection.body_text());
                ResultEnvelope::<()>::error(400, message)
                    .with_path(path)
                    .into_response()
            }
            Self::ValidationError { errors, path } => {
                let mut field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errs)| {
                        errs.iter().map(move |e| {
                            let msg = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string());
                            format!("{}: {}", field, msg)
                        })
                    })
                    .collect();
                field_errors.sort();

                let message = if field_errors.is_empty() {
                    "Validation failed".to_string()
                } else {
                    field_errors.join("; ")
                };

                ResultEnvelope::<()>::error(400, message)
                    .with_path(path)
                    .into_response()
            }
        }
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedQueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map(|uri| uri.0.path().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ValidatedQueryRejection::QueryError {
                rejection,
                path: path.clone(),
            })?;

        value
            .validate()
            .map_err(|errors| ValidatedQueryRejection::ValidationError { errors, path })?;

        Ok(ValidatedQuery(value))
    }
}
