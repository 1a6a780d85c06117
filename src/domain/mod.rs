//! Domain layer: the list-query engine, entities and repository ports.

pub mod query;
pub mod repositories;
pub mod room;

pub use query::{
    FilterClause, FilterOperator, FilterValue, ListQuery, PageMeta, PaginatedResult,
    PaginationRequest, QueryError, QueryHandle, QueryShaper, SortClause, SortDirection,
};
pub use repositories::RepositoryProvider;
pub use room::{Room, RoomRepository};
