//! Structured statements and their rendered CQL form
//!
//! Statements are built structurally and only rendered at the edge: a
//! networked collaborator ships `to_cql_with_params()`, while structured
//! collaborators read the table/conditions/assignments directly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Statement forms the mapping layer produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementKind {
    /// Exact composite-key selection
    Select,
    /// Full-row write; creates the row or overwrites the listed columns
    Upsert,
    /// Exact composite-key removal
    Delete,
}

/// One statement against the bound table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    kind: StatementKind,
    table: String,
    /// Exact-match WHERE bindings, in declared key order
    conditions: Vec<(String, Value)>,
    /// Column writes for upsert, in attribute declaration order
    assignments: Vec<(String, Value)>,
}

impl Statement {
    pub(crate) fn select(table: impl Into<String>, conditions: Vec<(String, Value)>) -> Self {
        Self {
            kind: StatementKind::Select,
            table: table.into(),
            conditions,
            assignments: Vec::new(),
        }
    }

    pub(crate) fn upsert(table: impl Into<String>, assignments: Vec<(String, Value)>) -> Self {
        Self {
            kind: StatementKind::Upsert,
            table: table.into(),
            conditions: Vec::new(),
            assignments,
        }
    }

    pub(crate) fn delete(table: impl Into<String>, conditions: Vec<(String, Value)>) -> Self {
        Self {
            kind: StatementKind::Delete,
            table: table.into(),
            conditions,
            assignments: Vec::new(),
        }
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    pub fn assignments(&self) -> &[(String, Value)] {
        &self.assignments
    }

    /// Render as CQL text with `?` placeholders and the parameters in
    /// placeholder order.
    pub fn to_cql_with_params(&self) -> (String, Vec<Value>) {
        match self.kind {
            StatementKind::Select => self.build_select(),
            StatementKind::Upsert => self.build_upsert(),
            StatementKind::Delete => self.build_delete(),
        }
    }

    fn build_select(&self) -> (String, Vec<Value>) {
        let mut cql = String::new();
        let mut params = Vec::new();

        cql.push_str("SELECT * FROM ");
        cql.push_str(&self.table);
        self.push_where_clause(&mut cql, &mut params);

        (cql, params)
    }

    fn build_upsert(&self) -> (String, Vec<Value>) {
        let mut cql = String::new();
        let mut params = Vec::new();

        cql.push_str("INSERT INTO ");
        cql.push_str(&self.table);
        cql.push_str(" (");
        let columns: Vec<&str> = self
            .assignments
            .iter()
            .map(|(column, _)| column.as_str())
            .collect();
        cql.push_str(&columns.join(", "));
        cql.push_str(") VALUES (");
        for (i, (_, value)) in self.assignments.iter().enumerate() {
            if i > 0 {
                cql.push_str(", ");
            }
            cql.push('?');
            params.push(value.clone());
        }
        cql.push(')');

        (cql, params)
    }

    fn build_delete(&self) -> (String, Vec<Value>) {
        let mut cql = String::new();
        let mut params = Vec::new();

        cql.push_str("DELETE FROM ");
        cql.push_str(&self.table);
        self.push_where_clause(&mut cql, &mut params);

        (cql, params)
    }

    fn push_where_clause(&self, cql: &mut String, params: &mut Vec<Value>) {
        if self.conditions.is_empty() {
            return;
        }
        cql.push_str(" WHERE ");
        for (i, (column, value)) in self.conditions.iter().enumerate() {
            if i > 0 {
                cql.push_str(" AND ");
            }
            cql.push_str(column);
            cql.push_str(" = ?");
            params.push(value.clone());
        }
    }
}

impl fmt::Display for Statement {
    /// Rendered with inline literals, for logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            StatementKind::Select => {
                write!(f, "SELECT * FROM {}", self.table)?;
                self.fmt_conditions(f)
            }
            StatementKind::Upsert => {
                let columns: Vec<&str> = self
                    .assignments
                    .iter()
                    .map(|(column, _)| column.as_str())
                    .collect();
                let values: Vec<String> = self
                    .assignments
                    .iter()
                    .map(|(_, value)| value.to_string())
                    .collect();
                write!(
                    f,
                    "INSERT INTO {} ({}) VALUES ({})",
                    self.table,
                    columns.join(", "),
                    values.join(", ")
                )
            }
            StatementKind::Delete => {
                write!(f, "DELETE FROM {}", self.table)?;
                self.fmt_conditions(f)
            }
        }
    }
}

impl Statement {
    fn fmt_conditions(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (column, value)) in self.conditions.iter().enumerate() {
            let separator = if i == 0 { " WHERE " } else { " AND " };
            write!(f, "{}{} = {}", separator, column, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_select_rendering() {
        let id = Uuid::new_v4();
        let statement = Statement::select(
            "companies",
            vec![
                ("id".to_string(), Value::Uuid(id)),
                ("score".to_string(), Value::Int(101)),
            ],
        );
        let (cql, params) = statement.to_cql_with_params();
        assert_eq!(cql, "SELECT * FROM companies WHERE id = ? AND score = ?");
        assert_eq!(params, vec![Value::Uuid(id), Value::Int(101)]);
    }

    #[test]
    fn test_upsert_rendering() {
        let statement = Statement::upsert(
            "companies",
            vec![
                ("id".to_string(), Value::Int(1)),
                ("name".to_string(), Value::Text("Testco".to_string())),
            ],
        );
        let (cql, params) = statement.to_cql_with_params();
        assert_eq!(cql, "INSERT INTO companies (id, name) VALUES (?, ?)");
        assert_eq!(
            params,
            vec![Value::Int(1), Value::Text("Testco".to_string())]
        );
    }

    #[test]
    fn test_delete_rendering() {
        let statement = Statement::delete(
            "companies",
            vec![("id".to_string(), Value::Int(1))],
        );
        let (cql, params) = statement.to_cql_with_params();
        assert_eq!(cql, "DELETE FROM companies WHERE id = ?");
        assert_eq!(params, vec![Value::Int(1)]);
    }

    #[test]
    fn test_display_inlines_literals() {
        let statement = Statement::select(
            "companies",
            vec![("name".to_string(), Value::Text("O'Brien".to_string()))],
        );
        assert_eq!(
            statement.to_string(),
            "SELECT * FROM companies WHERE name = 'O''Brien'"
        );
    }
}
