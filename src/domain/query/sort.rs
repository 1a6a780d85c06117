//! Sort translation
//!
//! Each clause becomes an `ORDER BY "<alias>"."<field>" <dir>` entry, in the
//! order the caller gave them. Nothing is re-sorted or deduplicated. With no
//! clauses the result is unordered absent explicit sort.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{QueryError, QueryHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(QueryError::validation(format!(
                "Sort order must be one of ASC, DESC (got '{}')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortClause {
    field: String,
    direction: SortDirection,
}

impl SortClause {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Result<Self, QueryError> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(QueryError::validation("Sort field must not be empty"));
        }
        Ok(Self { field, direction })
    }

    pub fn asc(field: impl Into<String>) -> Result<Self, QueryError> {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Result<Self, QueryError> {
        Self::new(field, SortDirection::Desc)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// `"<alias>"."<field>"`
pub fn order_fragment(alias: &str, field: &str) -> String {
    format!("\"{}\".\"{}\"", alias, field)
}

/// Appends one order-by entry per clause, first clause being the primary key.
pub fn apply_sorting<H: QueryHandle>(handle: &mut H, sorts: &[SortClause]) {
    for sort in sorts {
        let fragment = order_fragment(handle.alias(), sort.field());
        handle.order_by(fragment, sort.direction());
    }
}
