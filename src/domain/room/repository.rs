//! Room repository interface

use async_trait::async_trait;

use super::model::Room;
use crate::domain::query::{ListQuery, PaginatedResult, QueryError};

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// One page of non-deleted rooms shaped by `query`.
    ///
    /// Filter and sort fields must already be restricted to
    /// [`Room::QUERYABLE_FIELDS`].
    async fn find_page(&self, query: &ListQuery) -> Result<PaginatedResult<Room>, QueryError>;
}
