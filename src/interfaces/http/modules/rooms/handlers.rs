//! Room list handler

use std::sync::Arc;

use axum::extract::{OriginalUri, State};
use tracing::warn;

use crate::application::envelope::ResultEnvelope;
use crate::application::rooms::RoomService;
use crate::domain::query::PaginatedResult;
use crate::domain::Room;
use crate::interfaces::http::common::{decode_list_query, ValidatedQuery};

use super::dto::{ListRoomsParams, RoomDto};

#[derive(Clone)]
pub struct RoomsState {
    pub service: Arc<RoomService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    params(ListRoomsParams),
    responses(
        (status = 200, description = "One page of rooms", body = ResultEnvelope<PaginatedResult<RoomDto>>),
        (status = 400, description = "Invalid pagination, filter or sort"),
        (status = 500, description = "Query failed"),
        (status = 504, description = "Query timed out")
    )
)]
pub async fn list_rooms(
    State(state): State<RoomsState>,
    OriginalUri(uri): OriginalUri,
    ValidatedQuery(params): ValidatedQuery<ListRoomsParams>,
) -> ResultEnvelope<PaginatedResult<RoomDto>> {
    let path = uri.path().to_string();

    let query = match decode_list_query(
        params.page,
        params.limit,
        params.filters.as_deref(),
        params.sort.as_deref(),
        Room::QUERYABLE_FIELDS,
    ) {
        Ok(query) => query,
        Err(e) => {
            warn!(error = %e, "Rejected room list request");
            return ResultEnvelope::failure(&e).with_path(path);
        }
    };

    state
        .service
        .list_rooms(&query)
        .await
        .map_data(|page| page.map(RoomDto::from))
        .with_path(path)
}
