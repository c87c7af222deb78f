//! Attribute definitions and default providers

use crate::value::{AttributeKind, Value};

/// Default provider for an attribute
///
/// A static default is a single value fixed at schema registration and shared
/// across constructions. A generator runs once per constructed instance, for
/// defaults that must vary (fresh surrogate ids, creation timestamps).
#[derive(Debug, Clone)]
pub enum AttributeDefault {
    Static(Value),
    Generated(fn() -> Value),
}

impl AttributeDefault {
    pub(crate) fn produce(&self) -> Value {
        match self {
            AttributeDefault::Static(value) => value.clone(),
            AttributeDefault::Generated(generator) => generator(),
        }
    }
}

/// One declared attribute: name, kind, and optional default.
///
/// Immutable after schema registration.
#[derive(Debug, Clone)]
pub struct AttributeDefinition {
    name: String,
    kind: AttributeKind,
    default: Option<AttributeDefault>,
}

impl AttributeDefinition {
    pub(crate) fn new(name: String, kind: AttributeKind, default: Option<AttributeDefault>) -> Self {
        Self {
            name,
            kind,
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn default(&self) -> Option<&AttributeDefault> {
        self.default.as_ref()
    }

    /// The value a fresh instance receives when this attribute is not
    /// explicitly supplied: the default, or null without one.
    pub(crate) fn initial_value(&self) -> Value {
        match &self.default {
            Some(default) => default.produce(),
            None => Value::Null,
        }
    }
}
