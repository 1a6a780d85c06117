//! Room listing service

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::envelope::ResultEnvelope;
use crate::domain::query::{ListQuery, PaginatedResult};
use crate::domain::{RepositoryProvider, Room};

pub const ROOMS_RETRIEVED: &str = "Rooms retrieved successfully";
pub const NO_ROOMS_FOUND: &str = "No rooms found";

/// Service for room read operations
pub struct RoomService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RoomService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// List rooms for the given query.
    ///
    /// An empty page is still a 200, only the message changes. Any error is
    /// folded into a failure envelope.
    pub async fn list_rooms(&self, query: &ListQuery) -> ResultEnvelope<PaginatedResult<Room>> {
        match self.repos.rooms().find_page(query).await {
            Ok(page) => {
                let message = if page.is_empty() {
                    NO_ROOMS_FOUND
                } else {
                    ROOMS_RETRIEVED
                };
                info!(
                    returned = page.items.len(),
                    item_count = page.meta.item_count,
                    page = page.meta.page,
                    "Rooms listed"
                );
                ResultEnvelope::ok(page, message)
            }
            Err(e) => {
                warn!(error = %e, "Failed to list rooms");
                ResultEnvelope::failure(&e)
            }
        }
    }
}
