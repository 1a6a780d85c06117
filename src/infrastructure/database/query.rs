//! SeaORM query executor
//!
//! [`SeaOrmQueryHandle`] implements the domain `QueryHandle` port over a
//! sea-orm `Select<E>`. Named placeholders in predicate fragments are
//! rendered to positional `?` markers and bound in order, so client values
//! never enter the SQL text.
//!
//! Offset and limit are kept aside and only applied to the fetch; the count
//! runs over the same filtered select in one transaction. On Postgres that
//! transaction is read-only REPEATABLE READ so both statements share a
//! snapshot; SQLite's deferred transaction pins one at the first read.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Order};
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    IsolationLevel, PaginatorTrait, QuerySelect, QueryTrait, Select, TransactionTrait, Value,
};
use tracing::{debug, warn};

use crate::domain::query::{
    BoundParams, FilterValue, QueryError, QueryHandle, Scalar, SortDirection,
};
use crate::interfaces::http::modules::metrics::{record_list_query, Outcome};

/// Transaction settings that make the count and the fetch agree.
///
/// SQLite has no per-transaction isolation knob (sea-orm only warns), and
/// its read transactions are already snapshot-consistent.
fn snapshot_config(backend: DbBackend) -> (Option<IsolationLevel>, Option<AccessMode>) {
    match backend {
        DbBackend::Sqlite => (None, None),
        DbBackend::Postgres | DbBackend::MySql => (
            Some(IsolationLevel::RepeatableRead),
            Some(AccessMode::ReadOnly),
        ),
    }
}

pub struct SeaOrmQueryHandle<E: EntityTrait> {
    db: DatabaseConnection,
    select: Select<E>,
    alias: String,
    offset: Option<u64>,
    limit: Option<u64>,
    timeout: Duration,
}

impl<E: EntityTrait> SeaOrmQueryHandle<E> {
    /// `select` may already carry fixed conditions (e.g. soft-delete); the
    /// alias is the entity's table name.
    pub fn new(db: DatabaseConnection, select: Select<E>, timeout: Duration) -> Self {
        Self {
            db,
            select,
            alias: E::default().table_name().to_string(),
            offset: None,
            limit: None,
            timeout,
        }
    }

    async fn fetch_and_count(self) -> Result<(Vec<E::Model>, u64), DbErr>
    where
        E::Model: Send + Sync,
    {
        let (isolation, access) = snapshot_config(self.db.get_database_backend());
        let txn = self.db.begin_with_config(isolation, access).await?;
        let item_count = self.select.clone().count(&txn).await?;
        let rows = self
            .select
            .offset(self.offset)
            .limit(self.limit)
            .all(&txn)
            .await?;
        txn.commit().await?;
        Ok((rows, item_count))
    }
}

#[async_trait]
impl<E> QueryHandle for SeaOrmQueryHandle<E>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    type Row = E::Model;

    fn alias(&self) -> &str {
        &self.alias
    }

    fn filter(&mut self, fragment: String, params: BoundParams) -> Result<(), QueryError> {
        let (sql, values) = render_placeholders(&fragment, &params)?;
        debug!(table = %self.alias, predicate = %sql, bound = values.len(), "Adding predicate");
        QueryTrait::query(&mut self.select).and_where(Expr::cust_with_values(sql, values));
        Ok(())
    }

    fn order_by(&mut self, fragment: String, direction: SortDirection) {
        let order = match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        QueryTrait::query(&mut self.select).order_by_expr(Expr::cust(fragment), order);
    }

    fn limit(&mut self, n: u64) {
        self.limit = Some(n);
    }

    fn offset(&mut self, n: u64) {
        self.offset = Some(n);
    }

    async fn execute_fetch_and_count(self) -> Result<(Vec<E::Model>, u64), QueryError> {
        let alias = self.alias.clone();
        let timeout = self.timeout;
        let started = Instant::now();

        let outcome = match tokio::time::timeout(timeout, self.fetch_and_count()).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                warn!(table = %alias, error = %e, "List query failed");
                Err(QueryError::Execution(e.to_string()))
            }
            Err(_) => {
                let timeout_ms = timeout.as_millis() as u64;
                warn!(table = %alias, timeout_ms, "List query timed out");
                Err(QueryError::Timeout(timeout))
            }
        };

        let status = outcome.as_ref().map_or_else(QueryError::status_code, |_| 200);
        record_list_query(&alias, started.elapsed(), Outcome::from_status(status));
        outcome
    }
}

fn scalar_value(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Bool(b) => (*b).into(),
        Scalar::Int(i) => (*i).into(),
        Scalar::Float(x) => (*x).into(),
        Scalar::Text(s) => s.clone().into(),
    }
}

/// Rewrites `:name` to `?` and `:...name` to `?, ?, …`, collecting values
/// in placeholder order. Text inside double quotes is copied untouched.
pub(crate) fn render_placeholders(
    fragment: &str,
    params: &BoundParams,
) -> Result<(String, Vec<Value>), QueryError> {
    let mut sql = String::with_capacity(fragment.len());
    let mut values = Vec::new();
    let mut in_quotes = false;
    let mut chars = fragment.char_indices();

    while let Some((i, c)) = chars.next() {
        if c == '"' {
            in_quotes = !in_quotes;
        }
        if c != ':' || in_quotes {
            sql.push(c);
            continue;
        }

        let rest = &fragment[i + 1..];
        let (expand, skip) = match rest.strip_prefix("...") {
            Some(_) => (true, 3),
            None => (false, 0),
        };
        let tail = &rest[skip..];
        let name_len = tail
            .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
            .unwrap_or(tail.len());
        if name_len == 0 {
            sql.push(c);
            continue;
        }
        let name = &tail[..name_len];
        // "..." and identifier characters are ASCII: one char per byte
        for _ in 0..skip + name_len {
            chars.next();
        }

        let value = params.get(name).ok_or_else(|| {
            QueryError::validation(format!("No parameter bound for placeholder :{}", name))
        })?;
        match (expand, value) {
            (true, FilterValue::List(items)) if !items.is_empty() => {
                let markers = vec!["?"; items.len()].join(", ");
                sql.push_str(&markers);
                values.extend(items.iter().map(scalar_value));
            }
            (false, FilterValue::Scalar(scalar)) => {
                sql.push('?');
                values.push(scalar_value(scalar));
            }
            _ => {
                return Err(QueryError::validation(format!(
                    "Parameter :{} does not match its placeholder",
                    name
                )))
            }
        }
    }

    Ok((sql, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::{FilterClause, FilterOperator};

    fn render(clause: FilterClause) -> (String, Vec<Value>) {
        let predicate = clause.predicate().unwrap();
        render_placeholders(&predicate.fragment, &predicate.params).unwrap()
    }

    #[test]
    fn scalar_placeholder_becomes_marker() {
        let (sql, values) = render(
            FilterClause::new("capacity", FilterOperator::Gte, Some(10i64.into())).unwrap(),
        );
        assert_eq!(sql, r#""capacity" >= ?"#);
        assert_eq!(values, vec![Value::from(10i64)]);
    }

    #[test]
    fn like_binds_wrapped_text() {
        let (sql, values) =
            render(FilterClause::new("name", FilterOperator::Like, Some("test".into())).unwrap());
        assert_eq!(sql, r#""name" LIKE ?"#);
        assert_eq!(values, vec![Value::from("%test%".to_string())]);
    }

    #[test]
    fn list_placeholder_expands() {
        let (sql, values) = render(
            FilterClause::new("id", FilterOperator::NotIn, Some(FilterValue::list([1i64, 2, 3])))
                .unwrap(),
        );
        assert_eq!(sql, r#""id" NOT IN (?, ?, ?)"#);
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn nullness_has_no_markers() {
        let (sql, values) =
            render(FilterClause::new("deleted_at", FilterOperator::IsNull, None).unwrap());
        assert_eq!(sql, r#""deleted_at" IS NULL"#);
        assert!(values.is_empty());
    }

    #[test]
    fn hostile_values_stay_out_of_sql() {
        let (sql, values) = render(
            FilterClause::new(
                "name",
                FilterOperator::Equals,
                Some("x'; DROP TABLE rooms; --".into()),
            )
            .unwrap(),
        );
        assert_eq!(sql, r#""name" = ?"#);
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn colons_inside_quotes_are_literal() {
        let mut params = BoundParams::new();
        params.insert("a".into(), FilterValue::from(1i64));
        let (sql, values) = render_placeholders(r#""weird:col" = :a"#, &params).unwrap();
        assert_eq!(sql, r#""weird:col" = ?"#);
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn postgres_reads_run_in_a_repeatable_read_snapshot() {
        assert_eq!(
            snapshot_config(DbBackend::Postgres),
            (Some(IsolationLevel::RepeatableRead), Some(AccessMode::ReadOnly))
        );
        assert_eq!(snapshot_config(DbBackend::Sqlite), (None, None));
    }

    #[test]
    fn missing_parameter_is_an_error() {
        let err = render_placeholders(r#""name" = :name"#, &BoundParams::new()).unwrap_err();
        assert!(err.to_string().contains(":name"));
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let mut params = BoundParams::new();
        params.insert("id".into(), FilterValue::from(1i64));
        assert!(render_placeholders(r#""id" IN (:...id)"#, &params).is_err());
    }
}
