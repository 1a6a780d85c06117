//! SeaORM implementation of RepositoryProvider

use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::room::RoomRepository;

use super::room_repository::SeaOrmRoomRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone(), Duration::from_secs(10));
/// let page = repos.rooms().find_page(&ListQuery::default()).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    rooms: SeaOrmRoomRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection, query_timeout: Duration) -> Self {
        Self {
            rooms: SeaOrmRoomRepository::new(db, query_timeout),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }
}
