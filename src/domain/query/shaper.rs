//! Query shaper
//!
//! Drives a [`QueryHandle`] through filters, sort and pagination, always in
//! that order, then executes it once. Pagination is the last mutation so
//! offset/limit apply to the filtered and sorted set; the executor counts
//! matches ignoring offset/limit.

use async_trait::async_trait;
use tracing::debug;

use super::filter::{BoundParams, FilterClause};
use super::pagination::{PageMeta, PaginatedResult, PaginationRequest};
use super::sort::{apply_sorting, SortClause, SortDirection};
use super::QueryError;

/// Mutable query builder owned by a single request.
///
/// Implementations translate fragments and named parameters into the
/// store's own query language.
#[async_trait]
pub trait QueryHandle: Send {
    type Row: Send;

    /// Alias the main table is addressed by in order-by fragments.
    fn alias(&self) -> &str;

    /// ANDs a predicate into the query.
    fn filter(&mut self, fragment: String, params: BoundParams) -> Result<(), QueryError>;

    fn order_by(&mut self, fragment: String, direction: SortDirection);

    fn limit(&mut self, n: u64);

    fn offset(&mut self, n: u64);

    /// One attempt: the page of rows plus the count of all matching rows.
    async fn execute_fetch_and_count(self) -> Result<(Vec<Self::Row>, u64), QueryError>;
}

/// Decoded list parameters. Empty `filters`/`sorts` skip their stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub filters: Vec<FilterClause>,
    pub sorts: Vec<SortClause>,
    pub pagination: PaginationRequest,
}

impl ListQuery {
    pub fn new(pagination: PaginationRequest) -> Self {
        Self {
            pagination,
            ..Self::default()
        }
    }

    pub fn filter(mut self, clause: FilterClause) -> Self {
        self.filters.push(clause);
        self
    }

    pub fn sort(mut self, clause: SortClause) -> Self {
        self.sorts.push(clause);
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryShaper;

impl QueryShaper {
    pub fn apply_filters<H: QueryHandle>(
        handle: &mut H,
        filters: &[FilterClause],
    ) -> Result<(), QueryError> {
        for clause in filters {
            let predicate = clause.predicate()?;
            handle.filter(predicate.fragment, predicate.params)?;
        }
        Ok(())
    }

    pub fn apply_pagination<H: QueryHandle>(handle: &mut H, pagination: &PaginationRequest) {
        let (offset, limit) = pagination.to_offset_limit();
        handle.offset(offset);
        handle.limit(limit);
    }

    /// filters → sort → pagination.
    pub fn shape<H: QueryHandle>(mut handle: H, query: &ListQuery) -> Result<H, QueryError> {
        debug!(
            alias = handle.alias(),
            filters = query.filters.len(),
            sorts = query.sorts.len(),
            page = query.pagination.page(),
            limit = query.pagination.limit(),
            "Shaping list query"
        );
        Self::apply_filters(&mut handle, &query.filters)?;
        apply_sorting(&mut handle, &query.sorts);
        Self::apply_pagination(&mut handle, &query.pagination);
        Ok(handle)
    }

    pub async fn execute<H: QueryHandle>(handle: H) -> Result<(Vec<H::Row>, u64), QueryError> {
        handle.execute_fetch_and_count().await
    }

    /// Shape, execute and attach page metadata. Errors pass through untouched.
    pub async fn run<H: QueryHandle>(
        handle: H,
        query: &ListQuery,
    ) -> Result<PaginatedResult<H::Row>, QueryError> {
        let handle = Self::shape(handle, query)?;
        let (rows, item_count) = Self::execute(handle).await?;
        let meta = PageMeta::new(&query.pagination, item_count);
        debug!(
            returned = rows.len(),
            item_count,
            page_count = meta.page_count,
            "List query executed"
        );
        Ok(PaginatedResult::new(rows, meta))
    }
}
