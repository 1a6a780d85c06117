//! Filter operator catalog
//!
//! Turns `(field, operator, value)` into a predicate fragment with named
//! placeholders plus the parameters bound to them. Values never reach the
//! fragment text; only the field name does, quoted as an identifier.
//!
//! Field names are NOT checked against the table's columns here. Callers
//! must restrict them to an allow-list before building a [`FilterClause`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::QueryError;

/// Supported comparison operators, with their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum FilterOperator {
    #[serde(rename = "equals")]
    Equals,
    #[serde(rename = "not")]
    Not,
    #[serde(rename = "gt")]
    Gt,
    #[serde(rename = "gte")]
    Gte,
    #[serde(rename = "lt")]
    Lt,
    #[serde(rename = "lte")]
    Lte,
    #[serde(rename = "like")]
    Like,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "notIn")]
    NotIn,
    #[serde(rename = "isNull")]
    IsNull,
    #[serde(rename = "isNotNull")]
    IsNotNull,
}

/// How an operator consumes the clause value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    /// Scalar bound verbatim under the field name.
    Scalar,
    /// Scalar wrapped as `%value%`.
    Contains,
    /// Non-empty list bound verbatim, expanded by the executor.
    List,
    /// No parameter at all.
    Absent,
}

/// Catalog row: SQL operator text and binding rule.
#[derive(Debug, Clone, Copy)]
struct OperatorRule {
    sql: &'static str,
    binding: Binding,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 11] = [
        Self::Equals,
        Self::Not,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Like,
        Self::In,
        Self::NotIn,
        Self::IsNull,
        Self::IsNotNull,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::Not => "not",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Like => "like",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::IsNull => "isNull",
            Self::IsNotNull => "isNotNull",
        }
    }

    fn rule(self) -> OperatorRule {
        let (sql, binding) = match self {
            Self::Equals => ("=", Binding::Scalar),
            Self::Not => ("!=", Binding::Scalar),
            Self::Gt => (">", Binding::Scalar),
            Self::Gte => (">=", Binding::Scalar),
            Self::Lt => ("<", Binding::Scalar),
            Self::Lte => ("<=", Binding::Scalar),
            Self::Like => ("LIKE", Binding::Contains),
            Self::In => ("IN", Binding::List),
            Self::NotIn => ("NOT IN", Binding::List),
            Self::IsNull => ("IS NULL", Binding::Absent),
            Self::IsNotNull => ("IS NOT NULL", Binding::Absent),
        };
        OperatorRule { sql, binding }
    }

    /// `in` / `notIn` take a list of scalars.
    pub fn expects_list(self) -> bool {
        self.rule().binding == Binding::List
    }

    /// `isNull` / `isNotNull` ignore the value entirely.
    pub fn ignores_value(self) -> bool {
        self.rule().binding == Binding::Absent
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| QueryError::UnsupportedOperator(s.to_string()))
    }
}

/// A single filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Filter value as decoded from the request: a scalar or a list of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

macro_rules! scalar_into_filter_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FilterValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_into_filter_value!(&str, String, i64, f64, bool);

impl From<Scalar> for FilterValue {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl FilterValue {
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// Named parameters for one predicate fragment.
pub type BoundParams = BTreeMap<String, FilterValue>;

/// Fragment text plus the parameters its placeholders refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub fragment: String,
    pub params: BoundParams,
}

/// Validated `(field, operator, value)` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    field: String,
    operator: FilterOperator,
    value: Option<FilterValue>,
}

impl FilterClause {
    /// Checks the value shape against the operator.
    ///
    /// Nullness operators drop any value they were given.
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: Option<FilterValue>,
    ) -> Result<Self, QueryError> {
        let field = field.into();
        ensure_field(&field)?;

        let value = if operator.ignores_value() { None } else { value };
        match operator.rule().binding {
            Binding::Absent => {}
            Binding::List => {
                expect_list(&field, operator, value.as_ref())?;
            }
            Binding::Scalar | Binding::Contains => {
                expect_scalar(&field, operator, value.as_ref())?;
            }
        }

        Ok(Self {
            field,
            operator,
            value,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn value(&self) -> Option<&FilterValue> {
        self.value.as_ref()
    }

    pub fn predicate(&self) -> Result<Predicate, QueryError> {
        Ok(Predicate {
            fragment: stringify(&self.field, self.operator)?,
            params: bind(&self.field, self.operator, self.value.as_ref())?,
        })
    }
}

/// Predicate fragment for `field` under `operator`.
///
/// ```
/// use rooms_service::domain::query::{stringify, FilterOperator};
///
/// assert_eq!(stringify("name", FilterOperator::Like).unwrap(), r#""name" LIKE :name"#);
/// assert_eq!(stringify("id", FilterOperator::In).unwrap(), r#""id" IN (:...id)"#);
/// ```
pub fn stringify(field: &str, operator: FilterOperator) -> Result<String, QueryError> {
    ensure_field(field)?;
    let rule = operator.rule();
    let fragment = match rule.binding {
        Binding::Absent => format!("\"{}\" {}", field, rule.sql),
        Binding::List => format!("\"{}\" {} (:...{})", field, rule.sql, field),
        Binding::Scalar | Binding::Contains => format!("\"{}\" {} :{}", field, rule.sql, field),
    };
    Ok(fragment)
}

/// Parameters for `field` under `operator`, keyed by the field name.
pub fn bind(
    field: &str,
    operator: FilterOperator,
    value: Option<&FilterValue>,
) -> Result<BoundParams, QueryError> {
    ensure_field(field)?;
    let mut params = BoundParams::new();
    match operator.rule().binding {
        Binding::Absent => {}
        Binding::Scalar => {
            let scalar = expect_scalar(field, operator, value)?;
            params.insert(field.to_string(), FilterValue::Scalar(scalar.clone()));
        }
        Binding::Contains => {
            let scalar = expect_scalar(field, operator, value)?;
            params.insert(
                field.to_string(),
                FilterValue::Scalar(Scalar::Text(format!("%{}%", scalar))),
            );
        }
        Binding::List => {
            let items = expect_list(field, operator, value)?;
            params.insert(field.to_string(), FilterValue::List(items.to_vec()));
        }
    }
    Ok(params)
}

fn ensure_field(field: &str) -> Result<(), QueryError> {
    if field.trim().is_empty() {
        return Err(QueryError::validation("Filter field must not be empty"));
    }
    Ok(())
}

fn expect_scalar<'a>(
    field: &str,
    operator: FilterOperator,
    value: Option<&'a FilterValue>,
) -> Result<&'a Scalar, QueryError> {
    match value {
        Some(FilterValue::Scalar(scalar)) => Ok(scalar),
        _ => Err(QueryError::validation(format!(
            "Filter on '{}' with operator '{}' requires a single value",
            field, operator
        ))),
    }
}

fn expect_list<'a>(
    field: &str,
    operator: FilterOperator,
    value: Option<&'a FilterValue>,
) -> Result<&'a [Scalar], QueryError> {
    match value {
        Some(FilterValue::List(items)) if !items.is_empty() => Ok(items),
        _ => Err(QueryError::validation(format!(
            "Filter on '{}' with operator '{}' requires a non-empty list",
            field, operator
        ))),
    }
}
