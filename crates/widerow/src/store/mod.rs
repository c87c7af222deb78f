//! Store collaborator contract
//!
//! The mapping layer never talks to a column-family store directly; it hands
//! a [`Statement`] to a [`Session`] and gets raw rows or an execution error
//! back. Connection management, timeouts, and keyspace administration all
//! live behind the trait.

pub mod memory;

pub use memory::MemorySession;

use std::collections::HashMap;

use crate::query::Statement;
use crate::value::Value;

/// Errors reported by a store collaborator
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("statement rejected: {0}")]
    Malformed(String),

    #[error("table '{0}' does not exist")]
    UnknownTable(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("backend failure: {0}")]
    Backend(String),
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// One raw row returned by the store: column name to raw value.
///
/// Values are the store's native representation; the executor coerces them
/// to the declared attribute kinds during hydration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column append, for collaborator implementations and
    /// test fixtures.
    pub fn with_column(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.columns.insert(name.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(name.into(), value.into());
    }

    /// Get a column value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns.get(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.columns.iter()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// Ordered sequence of rows from one execution
pub type RowSet = Vec<Row>;

/// External store collaborator: statement in, rowset or error out.
///
/// Implementations must be invocable from any calling context; the mapping
/// layer blocks the calling thread until `execute` returns. It adds no
/// retries, locking, or ordering across concurrent callers; last write wins
/// per the store's own semantics.
pub trait Session: Send + Sync {
    fn execute(&self, statement: &Statement) -> Result<RowSet, StoreError>;
}
