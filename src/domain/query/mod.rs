//! Generic list-query engine: filter catalog, sort translation, pagination
//! and the shaper that composes them against a [`QueryHandle`].

pub mod error;
pub mod filter;
pub mod pagination;
pub mod shaper;
pub mod sort;

#[cfg(test)]
pub(crate) mod testing;

pub use error::QueryError;
pub use filter::{
    bind, stringify, BoundParams, FilterClause, FilterOperator, FilterValue, Predicate, Scalar,
};
pub use pagination::{
    PageMeta, PaginatedResult, PaginationRequest, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT,
};
pub use shaper::{ListQuery, QueryHandle, QueryShaper};
pub use sort::{apply_sorting, order_fragment, SortClause, SortDirection};
