//! Shared HTTP plumbing: envelope responses, validated query extraction and
//! list-query decoding.

pub mod list_query;
pub mod validated_query;

pub use list_query::{decode_list_query, FilterDto, SortDto, INVALID_JSON};
pub use validated_query::{ValidatedQuery, ValidatedQueryRejection};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::envelope::ResultEnvelope;

impl<T: Serialize> IntoResponse for ResultEnvelope<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
