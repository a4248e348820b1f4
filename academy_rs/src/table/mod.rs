//! Remote table access.
//!
//! [`RemoteTable`] is the only seam between the site and the hosted row store:
//! a select with equality filters and a single ordering, and a bulk insert.
//! Rows cross the seam as JSON values; the typed helpers [`fetch_rows`] and
//! [`insert_row`] bind them to the row types declared in [`crate::schema`].
//!
//! Implementations:
//! - [`RestTable`] - PostgREST over HTTP (`reqwest`), used by the site and CLI
//! - [`MemoryTable`] - in-process rows, used for previews and tests

mod memory;
mod rest;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::schema::TableRow;

pub use memory::MemoryTable;
pub use rest::RestTable;

/// Shared handle injected into every controller that talks to the backend.
pub type TableClient = Arc<dyn RemoteTable>;

/// Errors produced by table clients.
#[derive(Debug, Error)]
pub enum TableError {
    /// The request never produced a response (DNS, TLS, connection reset...)
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected row shape
    #[error("could not decode rows from '{table}': {source}")]
    Decode {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    /// A row could not be turned into JSON
    #[error("could not encode row for '{table}': {source}")]
    Encode {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    /// The client was built from an unusable configuration
    #[error("invalid table client configuration: {0}")]
    InvalidConfig(String),
}

/// Value side of an equality filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FilterValue {
    /// Whether a JSON column value equals this filter value.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (FilterValue::Bool(expected), Value::Bool(actual)) => expected == actual,
            (FilterValue::Int(expected), Value::Number(actual)) => actual.as_i64() == Some(*expected),
            (FilterValue::Text(expected), Value::String(actual)) => expected == actual,
            _ => false,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Bool(value) => write!(f, "{value}"),
            FilterValue::Int(value) => write!(f, "{value}"),
            FilterValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

/// `column = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub value: FilterValue,
}

/// Ordering on a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub ascending: bool,
}

/// A read query against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: &'static str,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl Select {
    /// Select every row of the table bound to `R`.
    pub fn rows<R: TableRow>() -> Self {
        Self {
            table: R::TABLE,
            filters: Vec::new(),
            order: None,
        }
    }

    /// Add an equality filter.
    pub fn eq(mut self, column: &'static str, value: impl Into<FilterValue>) -> Self {
        self.filters.push(Filter {
            column,
            value: value.into(),
        });
        self
    }

    /// Order the result. A later call replaces an earlier one.
    pub fn order_by(mut self, column: &'static str, ascending: bool) -> Self {
        self.order = Some(Order { column, ascending });
        self
    }
}

/// A named-table row store.
///
/// Every call is an independent round trip; implementations keep no cache and
/// offer no transactions. Futures are not required to be `Send` so the same
/// client runs on the browser event loop.
#[async_trait(?Send)]
pub trait RemoteTable: Send + Sync {
    /// Rows matching every filter, in the requested order.
    async fn select(&self, query: &Select) -> Result<Vec<Value>, TableError>;

    /// Append rows to `table`.
    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<(), TableError>;
}

/// Run `query` and decode the rows as `R`.
pub async fn fetch_rows<R: TableRow>(
    client: &dyn RemoteTable,
    query: &Select,
) -> Result<Vec<R>, TableError> {
    let rows = client.select(query).await?;
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|source| TableError::Decode {
                table: query.table.to_string(),
                source,
            })
        })
        .collect()
}

/// Insert one typed row into its table.
pub async fn insert_row<R: TableRow>(client: &dyn RemoteTable, row: &R) -> Result<(), TableError> {
    let value = serde_json::to_value(row).map_err(|source| TableError::Encode {
        table: R::TABLE.to_string(),
        source,
    })?;
    client.insert(R::TABLE, vec![value]).await
}
