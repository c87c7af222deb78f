//! The frozen per-model schema

use super::attribute::AttributeDefinition;
use super::builder::SchemaBuilder;

/// Immutable declaration of a model type: ordered attributes, the bound
/// store table, and the ordered composite-key subset.
///
/// Built once via [`SchemaBuilder`] and read-only afterwards; any number of
/// threads may read it without synchronization.
#[derive(Debug)]
pub struct Schema {
    table: String,
    attributes: Vec<AttributeDefinition>,
    key: Vec<String>,
}

impl Schema {
    pub(crate) fn new(
        table: String,
        attributes: Vec<AttributeDefinition>,
        key: Vec<String>,
    ) -> Self {
        Self {
            table,
            attributes,
            key,
        }
    }

    /// Start declaring a schema
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// The bound store table identifier
    pub fn table(&self) -> &str {
        &self.table
    }

    /// All attributes, in declaration order
    pub fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }

    /// Key attribute names, in declared key order
    pub fn key_names(&self) -> &[String] {
        &self.key
    }

    /// Non-panicking attribute lookup
    pub fn get_attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|attr| attr.name() == name)
    }

    /// Look up a declared attribute.
    ///
    /// # Panics
    ///
    /// Panics when `name` was never declared. Querying an unregistered
    /// attribute is a programmer error, not a data condition.
    pub fn attribute(&self, name: &str) -> &AttributeDefinition {
        self.get_attribute(name).unwrap_or_else(|| {
            panic!(
                "attribute '{}' is not declared for table '{}'",
                name, self.table
            )
        })
    }

    /// Whether an attribute name belongs to the key subset
    pub fn is_key(&self, name: &str) -> bool {
        self.key.iter().any(|key_name| key_name == name)
    }

    /// Whether an attribute name is declared at all
    pub fn contains(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }
}
