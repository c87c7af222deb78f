//! In-process column-family store
//!
//! Reference [`Session`] implementation backing the test suite. Tables are
//! created up front with their key columns, mirroring how a real
//! column-family store is provisioned before the mapping layer touches it.
//! Every executed statement is journaled so tests can assert whether the
//! store was reached at all.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use crate::query::{Statement, StatementKind};
use crate::value::Value;

use super::{Row, RowSet, Session, StoreError};

type KeyTuple = Vec<Value>;
type TableRows = BTreeMap<KeyTuple, HashMap<String, Value>>;

struct TableState {
    key_columns: Vec<String>,
    rows: TableRows,
}

#[derive(Default)]
struct Inner {
    tables: HashMap<String, TableState>,
    journal: Vec<Statement>,
}

/// In-memory wide-column store
#[derive(Default)]
pub struct MemorySession {
    inner: Mutex<Inner>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision a table with its composite key columns, in key order.
    /// Re-creating an existing table truncates it.
    pub fn create_table<I, S>(&self, table: &str, key_columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut inner = self.lock();
        inner.tables.insert(
            table.to_string(),
            TableState {
                key_columns: key_columns.into_iter().map(Into::into).collect(),
                rows: TableRows::new(),
            },
        );
    }

    /// Snapshot of every statement executed so far, in order.
    pub fn executed(&self) -> Vec<Statement> {
        self.lock().journal.clone()
    }

    /// Number of statements executed so far
    pub fn execution_count(&self) -> usize {
        self.lock().journal.len()
    }

    /// Number of rows currently stored in a table
    pub fn row_count(&self, table: &str) -> usize {
        self.lock()
            .tables
            .get(table)
            .map(|state| state.rows.len())
            .unwrap_or(0)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn key_tuple(
        state: &TableState,
        table: &str,
        bindings: &[(String, Value)],
    ) -> Result<KeyTuple, StoreError> {
        let mut tuple = KeyTuple::with_capacity(state.key_columns.len());
        for column in &state.key_columns {
            let value = bindings
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| value.clone())
                .ok_or_else(|| {
                    StoreError::Malformed(format!(
                        "statement against '{}' does not bind key column '{}'",
                        table, column
                    ))
                })?;
            if value.is_null() {
                return Err(StoreError::Malformed(format!(
                    "null key column '{}' for table '{}'",
                    column, table
                )));
            }
            tuple.push(value);
        }
        Ok(tuple)
    }
}

impl Session for MemorySession {
    fn execute(&self, statement: &Statement) -> Result<RowSet, StoreError> {
        let mut inner = self.lock();
        inner.journal.push(statement.clone());
        tracing::debug!(statement = %statement, "executing against memory store");

        let table = statement.table().to_string();
        let state = inner
            .tables
            .get_mut(&table)
            .ok_or_else(|| StoreError::UnknownTable(table.clone()))?;

        match statement.kind() {
            StatementKind::Select => {
                let tuple = Self::key_tuple(state, &table, statement.conditions())?;
                Ok(state
                    .rows
                    .get(&tuple)
                    .map(|columns| {
                        columns
                            .iter()
                            .map(|(name, value)| (name.clone(), value.clone()))
                            .collect::<Row>()
                    })
                    .into_iter()
                    .collect())
            }
            StatementKind::Upsert => {
                let tuple = Self::key_tuple(state, &table, statement.assignments())?;
                let row = state.rows.entry(tuple).or_default();
                for (column, value) in statement.assignments() {
                    row.insert(column.clone(), value.clone());
                }
                Ok(RowSet::new())
            }
            StatementKind::Delete => {
                let tuple = Self::key_tuple(state, &table, statement.conditions())?;
                state.rows.remove(&tuple);
                Ok(RowSet::new())
            }
        }
    }
}
