//! Statement execution and row hydration

use crate::error::ModelResult;
use crate::schema::Schema;
use crate::store::{Row, Session};
use crate::value::{Attributes, Value};

use super::builder::QueryBuilder;

/// Execute an exact-key selection and hydrate the first returned row.
///
/// Zero rows is the distinct not-found outcome, reported as `None`.
pub(crate) fn fetch_by_key(
    session: &dyn Session,
    schema: &'static Schema,
    key: &Attributes,
) -> ModelResult<Option<Attributes>> {
    let statement = QueryBuilder::new(schema).select_by_key(key)?;
    let rows = session.execute(&statement)?;
    match rows.into_iter().next() {
        Some(row) => Ok(Some(hydrate(schema, &row)?)),
        None => Ok(None),
    }
}

/// Convert one raw row into a full attribute map.
///
/// Each raw column value is coerced to the attribute's declared kind. Schema
/// attributes absent from the row hydrate to null, never to defaults: the
/// store is authoritative once a row exists. Row columns foreign to the
/// schema are ignored.
pub(crate) fn hydrate(schema: &'static Schema, row: &Row) -> ModelResult<Attributes> {
    let mut values = Attributes::with_capacity(schema.attributes().len());
    for attr in schema.attributes() {
        let value = match row.get(attr.name()) {
            Some(raw) => attr.kind().coerce(raw.clone())?,
            None => Value::Null,
        };
        values.insert(attr.name().to_string(), value);
    }
    for (column, _) in row.columns() {
        if !schema.contains(column) {
            tracing::debug!(
                table = %schema.table(),
                column = %column,
                "ignoring row column not present in schema"
            );
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use once_cell::sync::Lazy;
    use uuid::Uuid;

    use crate::error::ModelError;
    use crate::value::AttributeKind;

    use super::*;

    static EVENTS: Lazy<Schema> = Lazy::new(|| {
        Schema::builder()
            .attribute("id", AttributeKind::Uuid)
            .attribute("label", AttributeKind::Text)
            .attribute("at", AttributeKind::Timestamp)
            .table("events")
            .key(["id"])
            .build()
    });

    #[test]
    fn test_hydrate_coerces_raw_text_forms() {
        let id = Uuid::new_v4();
        let row = Row::new()
            .with_column("id", id.to_string())
            .with_column("label", "boot")
            .with_column("at", "2024-03-01T12:00:00+00:00");

        let values = hydrate(&EVENTS, &row).unwrap();
        assert_eq!(values["id"], Value::Uuid(id));
        assert_eq!(values["label"], Value::Text("boot".to_string()));
        assert!(matches!(values["at"], Value::Timestamp(_)));
    }

    #[test]
    fn test_hydrate_fills_absent_columns_with_null() {
        let row = Row::new().with_column("id", Uuid::new_v4());
        let values = hydrate(&EVENTS, &row).unwrap();
        assert_eq!(values["label"], Value::Null);
        assert_eq!(values["at"], Value::Null);
    }

    #[test]
    fn test_hydrate_ignores_stray_columns() {
        let row = Row::new()
            .with_column("id", Uuid::new_v4())
            .with_column("shard", 7i64);
        let values = hydrate(&EVENTS, &row).unwrap();
        assert!(!values.contains_key("shard"));
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_hydrate_surfaces_coercion_failures() {
        let row = Row::new().with_column("id", "definitely-not-a-uuid");
        let result = hydrate(&EVENTS, &row);
        assert!(matches!(result.unwrap_err(), ModelError::Coercion(_)));
    }
}
