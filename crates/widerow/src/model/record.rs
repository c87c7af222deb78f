//! Dynamic model instance
//!
//! A `Record` is one row's worth of attribute values bound to its model
//! type's schema. Construction applies schema defaults; validity and the
//! save/find/load protocol follow the composite key.

use crate::error::{ModelError, ModelResult};
use crate::query::{executor, QueryBuilder};
use crate::schema::Schema;
use crate::store::Session;
use crate::value::{Attributes, Value};

static NULL: Value = Value::Null;

/// One model instance: a full attribute map over a `&'static Schema`.
///
/// Two records are equal iff they are bound to the same schema (same model
/// type) and their full attribute maps are equal, key and non-key alike.
/// Records over different schemas are simply unequal, never an error.
#[derive(Debug, Clone)]
pub struct Record {
    schema: &'static Schema,
    values: Attributes,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.values == other.values
    }
}

impl Record {
    /// Construct an instance from explicit attribute values.
    ///
    /// Every schema attribute absent from `values` receives its default:
    /// the shared static value, a per-instance generated value, or null.
    /// An explicit null stays null; defaults only fill absence. Key
    /// completeness is NOT validated here; invalidity is only observed via
    /// [`Record::is_valid`].
    ///
    /// # Panics
    ///
    /// Panics when a value is supplied for an attribute the schema never
    /// declared.
    pub fn new<I, S>(schema: &'static Schema, values: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut map = Attributes::new();
        for (name, value) in values {
            let name = name.into();
            schema.attribute(&name);
            map.insert(name, value);
        }
        for attr in schema.attributes() {
            if !map.contains_key(attr.name()) {
                map.insert(attr.name().to_string(), attr.initial_value());
            }
        }
        Self {
            schema,
            values: map,
        }
    }

    /// Rebuild an instance from an already-complete attribute map, e.g. a
    /// hydrated row. Defaults are not applied.
    pub(crate) fn from_values(schema: &'static Schema, values: Attributes) -> Self {
        Self { schema, values }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// The schema's bound table identifier
    pub fn table(&self) -> &str {
        self.schema.table()
    }

    /// Current value of one attribute.
    ///
    /// # Panics
    ///
    /// Panics on an undeclared attribute name.
    pub fn get(&self, name: &str) -> &Value {
        self.schema.attribute(name);
        self.values.get(name).unwrap_or(&NULL)
    }

    /// Overwrite one attribute.
    ///
    /// # Panics
    ///
    /// Panics on an undeclared attribute name.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.schema.attribute(name);
        self.values.insert(name.to_string(), value.into());
    }

    /// Key attribute pairs in schema-declared key order, read off current
    /// state.
    pub fn key(&self) -> Vec<(String, Value)> {
        self.schema
            .key_names()
            .iter()
            .map(|name| (name.clone(), self.get(name).clone()))
            .collect()
    }

    /// True iff every key attribute is non-null. Non-key attributes never
    /// affect validity.
    pub fn is_valid(&self) -> bool {
        self.schema
            .key_names()
            .iter()
            .all(|name| !self.get(name).is_null())
    }

    /// Snapshot copy of the full attribute map
    pub fn attributes(&self) -> Attributes {
        self.values.clone()
    }

    /// Overlay explicit values on top of the current ones; explicit wins,
    /// everything else is preserved.
    ///
    /// # Panics
    ///
    /// Panics on an undeclared attribute name.
    pub fn merge<I, S>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        for (name, value) in overrides {
            let name = name.into();
            self.set(&name, value);
        }
    }

    /// Exact composite-key lookup.
    ///
    /// The key input must bind every key attribute and nothing else;
    /// otherwise `ModelError::InvalidKey` is returned before the store is
    /// touched. Zero matching rows report as `Ok(None)`.
    pub fn find<I, S>(
        session: &dyn Session,
        schema: &'static Schema,
        key: I,
    ) -> ModelResult<Option<Self>>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let key: Attributes = key.into_iter().map(|(name, value)| (name.into(), value)).collect();
        match executor::fetch_by_key(session, schema, &key)? {
            Some(values) => Ok(Some(Self::from_values(schema, values))),
            None => Ok(None),
        }
    }

    /// [`Record::find`], with a miss upgraded to `ModelError::NotFound`.
    pub fn find_or_fail<I, S>(
        session: &dyn Session,
        schema: &'static Schema,
        key: I,
    ) -> ModelResult<Self>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Self::find(session, schema, key)?
            .ok_or_else(|| ModelError::NotFound(schema.table().to_string()))
    }

    /// Fetch the row addressed by the key subset of `partial`, then overlay
    /// `partial` on top of it: explicit values win, fetched-only columns are
    /// preserved. No write is executed. `Ok(None)` when the base row is
    /// absent.
    ///
    /// `partial` must fully specify the key; unlike [`Record::find`] it may
    /// carry any mix of non-key attributes.
    pub fn load<I, S>(
        session: &dyn Session,
        schema: &'static Schema,
        partial: I,
    ) -> ModelResult<Option<Self>>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let partial: Attributes = partial
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        let key: Attributes = partial
            .iter()
            .filter(|(name, _)| schema.is_key(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        match executor::fetch_by_key(session, schema, &key)? {
            Some(values) => {
                let mut record = Self::from_values(schema, values);
                record.merge(partial);
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Upsert the full current attribute set as one row, keyed by the
    /// current key.
    ///
    /// An invalid record (any null key attribute) is a silent no-op: no
    /// statement is built or executed and `Ok(())` is returned. Execution
    /// failures from the collaborator propagate unmodified.
    pub fn save(&self, session: &dyn Session) -> ModelResult<()> {
        if !self.is_valid() {
            tracing::debug!(
                table = %self.table(),
                "skipping save of record with incomplete key"
            );
            return Ok(());
        }
        let statement = QueryBuilder::new(self.schema).upsert_row(&self.values);
        session.execute(&statement)?;
        Ok(())
    }

    /// Remove the row addressed by the current key.
    ///
    /// Unlike [`Record::save`], deleting with an incomplete key is an error.
    pub fn delete(&self, session: &dyn Session) -> ModelResult<()> {
        if !self.is_valid() {
            return Err(ModelError::MissingKey);
        }
        let key: Attributes = self.key().into_iter().collect();
        let statement = QueryBuilder::new(self.schema).delete_by_key(&key)?;
        session.execute(&statement)?;
        Ok(())
    }
}
