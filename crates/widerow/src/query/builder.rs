//! Statement construction with composite-key validation
//!
//! All key validation happens here, before any statement exists: the store
//! collaborator is never invoked on a malformed key.

use crate::error::{ModelError, ModelResult};
use crate::schema::Schema;
use crate::value::{Attributes, Value};

use super::statement::Statement;

/// Builds statements for one schema
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder {
    schema: &'static Schema,
}

impl QueryBuilder {
    pub fn new(schema: &'static Schema) -> Self {
        Self { schema }
    }

    /// Exact-match selection by complete composite key.
    ///
    /// The input must bind every key attribute and nothing outside the key
    /// set; anything else is an argument error raised before the store is
    /// touched.
    pub fn select_by_key(&self, key: &Attributes) -> ModelResult<Statement> {
        let conditions = self.key_conditions(key)?;
        Ok(Statement::select(self.schema.table(), conditions))
    }

    /// Full-row upsert of the given attribute set.
    ///
    /// Columns are listed in attribute declaration order; null attributes
    /// are omitted, since an unset column is the wide-column representation
    /// of null.
    pub fn upsert_row(&self, values: &Attributes) -> Statement {
        let assignments = self
            .schema
            .attributes()
            .iter()
            .filter_map(|attr| {
                values
                    .get(attr.name())
                    .filter(|value| !value.is_null())
                    .map(|value| (attr.name().to_string(), value.clone()))
            })
            .collect();
        Statement::upsert(self.schema.table(), assignments)
    }

    /// Exact-match removal by complete composite key, validated like
    /// [`QueryBuilder::select_by_key`].
    pub fn delete_by_key(&self, key: &Attributes) -> ModelResult<Statement> {
        let conditions = self.key_conditions(key)?;
        Ok(Statement::delete(self.schema.table(), conditions))
    }

    fn key_conditions(&self, key: &Attributes) -> ModelResult<Vec<(String, Value)>> {
        for name in self.schema.key_names() {
            if !key.contains_key(name) {
                return Err(ModelError::InvalidKey(format!(
                    "missing key attribute '{}' for table '{}'",
                    name,
                    self.schema.table()
                )));
            }
        }
        for name in key.keys() {
            if !self.schema.is_key(name) {
                return Err(ModelError::InvalidKey(format!(
                    "'{}' is not a key attribute of table '{}'",
                    name,
                    self.schema.table()
                )));
            }
        }
        Ok(self
            .schema
            .key_names()
            .iter()
            .map(|name| (name.clone(), key[name].clone()))
            .collect())
    }
}
