//! Room DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::query::{DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::domain::Room;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Query parameters of `GET /api/v1/rooms`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRoomsParams {
    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    #[param(default = 1, minimum = 1)]
    pub page: u32,

    /// Page size
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 50, message = "limit must be between 1 and 50"))]
    #[param(default = 10, minimum = 1, maximum = 50)]
    pub limit: u32,

    /// JSON array of `{"field", "operator", "value"}` objects
    pub filters: Option<String>,

    /// JSON array of `{"field", "order"}` objects, `order` being `ASC` or `DESC`
    pub sort: Option<String>,
}

/// Room as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoomDto {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Room> for RoomDto {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            name: room.name,
            capacity: room.capacity,
            user_id: room.user_id,
            created_at: room.created_at,
            updated_at: room.updated_at,
        }
    }
}
