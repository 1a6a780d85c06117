//! SeaORM implementation of RoomRepository

use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::query::{ListQuery, PaginatedResult, QueryError, QueryShaper};
use crate::domain::room::{Room, RoomRepository};
use crate::infrastructure::database::entities::room;
use crate::infrastructure::database::query::SeaOrmQueryHandle;

fn model_to_domain(m: room::Model) -> Room {
    Room {
        id: m.id,
        name: m.name,
        capacity: m.capacity,
        user_id: m.user_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
        deleted_at: m.deleted_at,
    }
}

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
    query_timeout: Duration,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection, query_timeout: Duration) -> Self {
        Self { db, query_timeout }
    }
}

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn find_page(&self, query: &ListQuery) -> Result<PaginatedResult<Room>, QueryError> {
        let select = room::Entity::find().filter(room::Column::DeletedAt.is_null());
        let handle = SeaOrmQueryHandle::new(self.db.clone(), select, self.query_timeout);
        let page = QueryShaper::run(handle, query).await?;
        Ok(page.map(model_to_domain))
    }
}
