//! Decodes list query parameters into a [`ListQuery`].
//!
//! `filters` and `sort` arrive as JSON arrays inside the query string:
//!
//! ```text
//! ?filters=[{"field":"capacity","operator":"gte","value":10}]&sort=[{"field":"name","order":"ASC"}]
//! ```
//!
//! Field names are checked against the caller's allow-list before they reach
//! the query engine, which quotes them but does not otherwise vet them.

use std::str::FromStr;

use serde::Deserialize;

use crate::domain::query::{
    FilterClause, FilterOperator, FilterValue, ListQuery, PaginationRequest, QueryError,
    SortClause, SortDirection,
};

pub const INVALID_JSON: &str = "Invalid JSON format for filters or sort";

/// One element of the `filters` array.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterDto {
    pub field: String,
    /// Operator name, e.g. `equals`, `gte`, `in`, `isNull`
    pub operator: String,
    #[serde(default)]
    pub value: Option<FilterValue>,
}

/// One element of the `sort` array.
#[derive(Debug, Clone, Deserialize)]
pub struct SortDto {
    pub field: String,
    /// `ASC` or `DESC`; defaults to `ASC`
    #[serde(default)]
    pub order: Option<String>,
}

fn parse_array<T: for<'de> Deserialize<'de>>(raw: Option<&str>) -> Result<Vec<T>, QueryError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(json) => serde_json::from_str(json).map_err(|_| QueryError::validation(INVALID_JSON)),
    }
}

fn ensure_allowed(kind: &str, field: &str, allowed: &[&str]) -> Result<(), QueryError> {
    if allowed.contains(&field) {
        Ok(())
    } else {
        Err(QueryError::validation(format!("Unknown {} field: {}", kind, field)))
    }
}

/// Build a [`ListQuery`] from raw request parameters.
///
/// Both JSON payloads are parsed before any clause is validated, so a
/// malformed `sort` is reported even when `filters` also has problems.
pub fn decode_list_query(
    page: u32,
    limit: u32,
    filters: Option<&str>,
    sort: Option<&str>,
    allowed_fields: &[&str],
) -> Result<ListQuery, QueryError> {
    let filter_dtos: Vec<FilterDto> = parse_array(filters)?;
    let sort_dtos: Vec<SortDto> = parse_array(sort)?;

    let mut query = ListQuery::new(PaginationRequest::new(page, limit)?);

    for dto in filter_dtos {
        ensure_allowed("filter", &dto.field, allowed_fields)?;
        let operator = FilterOperator::from_str(&dto.operator)?;
        query = query.filter(FilterClause::new(dto.field, operator, dto.value)?);
    }

    for dto in sort_dtos {
        ensure_allowed("sort", &dto.field, allowed_fields)?;
        let direction = match dto.order.as_deref() {
            Some(order) => SortDirection::from_str(order)?,
            None => SortDirection::Asc,
        };
        query = query.sort(SortClause::new(dto.field, direction)?);
    }

    Ok(query)
}
