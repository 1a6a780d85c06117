//! Pagination calculator

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::QueryError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 50;

/// Requested page, 1-based. `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationRequest {
    page: u32,
    limit: u32,
}

impl PaginationRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self, QueryError> {
        if page < 1 {
            return Err(QueryError::validation("page must be at least 1"));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(QueryError::validation(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    pub fn to_offset_limit(&self) -> (u64, u64) {
        (self.offset(), self.limit as u64)
    }
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Page metadata, recomputed for every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub item_count: u64,
    pub page_count: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageMeta {
    /// `has_previous` only looks at the requested page, so page 3 of an
    /// empty set still reports a previous page.
    pub fn new(request: &PaginationRequest, item_count: u64) -> Self {
        let page_count = item_count.div_ceil(request.limit as u64);
        Self {
            page: request.page,
            limit: request.limit,
            item_count,
            page_count,
            has_next: (request.page as u64) < page_count,
            has_previous: request.page > 1,
        }
    }
}

/// One page of rows with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, meta: PageMeta) -> Self {
        Self { items, meta }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U, F>(self, f: F) -> PaginatedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
