//! Fluent schema declaration with fail-fast validation

use crate::value::{AttributeKind, Value};

use super::attribute::{AttributeDefault, AttributeDefinition};
use super::definition::Schema;

/// Builder for [`Schema`]
///
/// Declaration is append-only and happens once per model type, before any
/// instance is constructed. Misuse panics; see the individual methods and
/// [`SchemaBuilder::build`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    table: Option<String>,
    attributes: Vec<AttributeDefinition>,
    key: Vec<String>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an attribute with no default.
    ///
    /// # Panics
    ///
    /// Panics when `name` is already declared.
    pub fn attribute(self, name: impl Into<String>, kind: AttributeKind) -> Self {
        self.push(name.into(), kind, None)
    }

    /// Declare an attribute with a static default, fixed now and shared by
    /// every construction that omits the attribute.
    ///
    /// # Panics
    ///
    /// Panics when `name` is already declared or the default value does not
    /// match `kind`.
    pub fn attribute_with_default(
        self,
        name: impl Into<String>,
        kind: AttributeKind,
        default: impl Into<Value>,
    ) -> Self {
        let name = name.into();
        let default = default.into();
        assert!(
            kind.matches(&default),
            "default for attribute '{}' does not match kind {}",
            name,
            kind
        );
        self.push(name, kind, Some(AttributeDefault::Static(default)))
    }

    /// Declare an attribute whose default is generated per constructed
    /// instance.
    ///
    /// # Panics
    ///
    /// Panics when `name` is already declared.
    pub fn attribute_with_generator(
        self,
        name: impl Into<String>,
        kind: AttributeKind,
        generator: fn() -> Value,
    ) -> Self {
        self.push(name.into(), kind, Some(AttributeDefault::Generated(generator)))
    }

    fn push(
        mut self,
        name: String,
        kind: AttributeKind,
        default: Option<AttributeDefault>,
    ) -> Self {
        assert!(
            !self.attributes.iter().any(|attr| attr.name() == name),
            "attribute '{}' declared twice",
            name
        );
        self.attributes
            .push(AttributeDefinition::new(name, kind, default));
        self
    }

    /// Bind the store table identifier
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.table = Some(name.into());
        self
    }

    /// Mark the ordered key subset; partition and clustering components in
    /// one ordered list.
    pub fn key<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key = names.into_iter().map(Into::into).collect();
        self
    }

    /// Validate and freeze the schema.
    ///
    /// # Panics
    ///
    /// Panics when the table was never bound, the key set is empty, or a key
    /// name was never declared as an attribute.
    pub fn build(self) -> Schema {
        let table = self.table.expect("schema has no table bound");
        assert!(!self.key.is_empty(), "schema for table '{}' has an empty key", table);
        for name in &self.key {
            assert!(
                self.attributes.iter().any(|attr| attr.name() == *name),
                "key attribute '{}' is not declared for table '{}'",
                name,
                table
            );
        }
        Schema::new(table, self.attributes, self.key)
    }
}
