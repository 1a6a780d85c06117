//! Rooms module: paginated, filterable listing

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::application::rooms::RoomService;

/// `/api/v1/rooms` routes with their state applied.
pub fn routes(service: Arc<RoomService>) -> Router {
    Router::new()
        .route("/api/v1/rooms", get(handlers::list_rooms))
        .with_state(RoomsState { service })
}
