//! In-memory `QueryHandle` that records every call.

use async_trait::async_trait;

use super::filter::BoundParams;
use super::sort::SortDirection;
use super::{QueryError, QueryHandle};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Filter(String, BoundParams),
    OrderBy(String, SortDirection),
    Limit(u64),
    Offset(u64),
}

#[derive(Debug, Default)]
pub struct RecordingHandle {
    alias: String,
    pub calls: Vec<Call>,
    pub rows: Vec<u32>,
    pub total: u64,
    pub reject_filters: Option<QueryError>,
    pub fail_with: Option<QueryError>,
}

impl RecordingHandle {
    pub fn new(alias: &str) -> Self {
        Self {
            alias: alias.to_string(),
            ..Self::default()
        }
    }

    pub fn returning(mut self, rows: Vec<u32>, total: u64) -> Self {
        self.rows = rows;
        self.total = total;
        self
    }
}

#[async_trait]
impl QueryHandle for RecordingHandle {
    type Row = u32;

    fn alias(&self) -> &str {
        &self.alias
    }

    fn filter(&mut self, fragment: String, params: BoundParams) -> Result<(), QueryError> {
        if let Some(err) = self.reject_filters.clone() {
            return Err(err);
        }
        self.calls.push(Call::Filter(fragment, params));
        Ok(())
    }

    fn order_by(&mut self, fragment: String, direction: SortDirection) {
        self.calls.push(Call::OrderBy(fragment, direction));
    }

    fn limit(&mut self, n: u64) {
        self.calls.push(Call::Limit(n));
    }

    fn offset(&mut self, n: u64) {
        self.calls.push(Call::Offset(n));
    }

    async fn execute_fetch_and_count(self) -> Result<(Vec<u32>, u64), QueryError> {
        match self.fail_with {
            Some(err) => Err(err),
            None => Ok((self.rows, self.total)),
        }
    }
}
