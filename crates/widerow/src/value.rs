//! Attribute kinds and values
//!
//! The mapping layer works over a small closed set of attribute kinds. Each
//! kind owns the coercion rules that turn a raw store value into the declared
//! representation during row hydration.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::{ModelError, ModelResult};

/// Full attribute map of a model instance: attribute name to current value.
pub type Attributes = HashMap<String, Value>;

/// Declared kind of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Opaque unique identifier
    Uuid,
    /// UTF-8 text
    Text,
    /// 64-bit signed integer
    Int,
    /// Point in time, UTC
    Timestamp,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Uuid => write!(f, "uuid"),
            AttributeKind::Text => write!(f, "text"),
            AttributeKind::Int => write!(f, "int"),
            AttributeKind::Timestamp => write!(f, "timestamp"),
        }
    }
}

impl AttributeKind {
    /// Coerce a raw store value into this kind.
    ///
    /// Stores commonly hand back wider representations than the declared
    /// attribute kind: uuid and timestamp columns arrive as text from some
    /// drivers. Null passes through untouched regardless of kind.
    pub fn coerce(&self, raw: Value) -> ModelResult<Value> {
        match (self, raw) {
            (_, Value::Null) => Ok(Value::Null),
            (AttributeKind::Uuid, Value::Uuid(id)) => Ok(Value::Uuid(id)),
            (AttributeKind::Uuid, Value::Text(text)) => Uuid::parse_str(&text)
                .map(Value::Uuid)
                .map_err(|e| ModelError::Coercion(format!("'{}' is not a uuid: {}", text, e))),
            (AttributeKind::Text, Value::Text(text)) => Ok(Value::Text(text)),
            (AttributeKind::Int, Value::Int(n)) => Ok(Value::Int(n)),
            (AttributeKind::Timestamp, Value::Timestamp(ts)) => Ok(Value::Timestamp(ts)),
            (AttributeKind::Timestamp, Value::Text(text)) => {
                DateTime::parse_from_rfc3339(&text)
                    .map(|ts| Value::Timestamp(ts.with_timezone(&Utc)))
                    .map_err(|e| {
                        ModelError::Coercion(format!("'{}' is not a timestamp: {}", text, e))
                    })
            }
            (kind, raw) => Err(ModelError::Coercion(format!(
                "cannot read {:?} as {}",
                raw, kind
            ))),
        }
    }

    /// Check whether a value already matches this kind. Null matches any kind.
    pub fn matches(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            other => other.kind() == Some(*self),
        }
    }
}

/// Typed attribute value
///
/// `Ord` so composite key tuples order deterministically inside stores that
/// index by them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Value {
    Null,
    Uuid(Uuid),
    Text(String),
    Int(i64),
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The kind this value inhabits; `None` for null.
    pub fn kind(&self) -> Option<AttributeKind> {
        match self {
            Value::Null => None,
            Value::Uuid(_) => Some(AttributeKind::Uuid),
            Value::Text(_) => Some(AttributeKind::Text),
            Value::Int(_) => Some(AttributeKind::Int),
            Value::Timestamp(_) => Some(AttributeKind::Timestamp),
        }
    }

    /// Extract as UUID if this is a uuid value
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Value::Uuid(id) => Some(*id),
            _ => None,
        }
    }

    /// Extract as text if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Extract as i64 if this is an integer value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract as a UTC timestamp if this is a timestamp value
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Uuid(id) => JsonValue::String(id.to_string()),
            Value::Text(text) => JsonValue::String(text.clone()),
            Value::Int(n) => JsonValue::Number(serde_json::Number::from(*n)),
            Value::Timestamp(ts) => JsonValue::String(ts.to_rfc3339()),
        }
    }

    /// Create a Value from a JSON value
    ///
    /// Strings are tried as UUID first, then as an RFC 3339 timestamp, and
    /// fall back to text. JSON shapes outside the attribute kind set (bool,
    /// float, array, object) are rejected.
    pub fn from_json(json: JsonValue) -> ModelResult<Self> {
        match json {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .ok_or_else(|| ModelError::Serialization(format!("non-integer number: {}", n))),
            JsonValue::String(s) => {
                if let Ok(id) = Uuid::parse_str(&s) {
                    Ok(Value::Uuid(id))
                } else if let Ok(ts) = DateTime::parse_from_rfc3339(&s) {
                    Ok(Value::Timestamp(ts.with_timezone(&Utc)))
                } else {
                    Ok(Value::Text(s))
                }
            }
            other => Err(ModelError::Serialization(format!(
                "unsupported JSON shape for an attribute value: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Value {
    /// CQL literal form, used when a statement is rendered for logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Uuid(id) => write!(f, "{}", id),
            Value::Text(text) => write!(f, "'{}'", text.replace('\'', "''")),
            Value::Int(n) => write!(f, "{}", n),
            Value::Timestamp(ts) => write!(f, "'{}'", ts.to_rfc3339()),
        }
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_coercion_accepts_text_forms() {
        let id = Uuid::new_v4();
        let coerced = AttributeKind::Uuid
            .coerce(Value::Text(id.to_string()))
            .unwrap();
        assert_eq!(coerced, Value::Uuid(id));

        let ts = AttributeKind::Timestamp
            .coerce(Value::Text("2024-03-01T12:00:00+00:00".to_string()))
            .unwrap();
        assert!(matches!(ts, Value::Timestamp(_)));
    }

    #[test]
    fn test_kind_coercion_passes_null_through() {
        assert_eq!(
            AttributeKind::Int.coerce(Value::Null).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_kind_coercion_rejects_mismatches() {
        let result = AttributeKind::Int.coerce(Value::Text("ten".to_string()));
        assert!(matches!(result.unwrap_err(), ModelError::Coercion(_)));

        let result = AttributeKind::Uuid.coerce(Value::Text("not-a-uuid".to_string()));
        assert!(matches!(result.unwrap_err(), ModelError::Coercion(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let id = Uuid::new_v4();
        let original = Value::Uuid(id);
        assert_eq!(Value::from_json(original.to_json()).unwrap(), original);

        assert_eq!(
            Value::from_json(Value::Int(42).to_json()).unwrap(),
            Value::Int(42)
        );
        assert_eq!(
            Value::from_json(Value::Text("plain".to_string()).to_json()).unwrap(),
            Value::Text("plain".to_string())
        );
    }

    #[test]
    fn test_from_json_rejects_foreign_shapes() {
        let result = Value::from_json(serde_json::json!({"nested": true}));
        assert!(matches!(result.unwrap_err(), ModelError::Serialization(_)));
    }

    #[test]
    fn test_literal_rendering_escapes_quotes() {
        let value = Value::Text("O'Brien".to_string());
        assert_eq!(format!("{}", value), "'O''Brien'");
        assert_eq!(format!("{}", Value::Null), "NULL");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(7i64)), Value::Int(7));
    }
}
