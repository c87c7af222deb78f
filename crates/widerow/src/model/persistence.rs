//! Persistence operations for typed models
//!
//! Blanket implementation over every [`Model`]; all semantics delegate to
//! the [`Record`] layer, including save-on-invalid as a silent no-op.

use crate::error::ModelResult;
use crate::model::record::Record;
use crate::store::Session;
use crate::value::Value;

use super::core_trait::Model;

/// Trait providing find/load/save/delete for typed models
pub trait Persistence: Model {
    /// Find a model by its complete composite key
    fn find<I, S>(session: &dyn Session, key: I) -> ModelResult<Option<Self>>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        match Record::find(session, Self::schema(), key)? {
            Some(record) => Self::from_record(record).map(Some),
            None => Ok(None),
        }
    }

    /// Find a model by key or return `ModelError::NotFound`
    fn find_or_fail<I, S>(session: &dyn Session, key: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Record::find_or_fail(session, Self::schema(), key).and_then(Self::from_record)
    }

    /// Fetch the stored row for the key inside `partial` and overlay
    /// `partial` on top of it
    fn load<I, S>(session: &dyn Session, partial: I) -> ModelResult<Option<Self>>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        match Record::load(session, Self::schema(), partial)? {
            Some(record) => Self::from_record(record).map(Some),
            None => Ok(None),
        }
    }

    /// Upsert this model's full attribute set; a no-op when the key is
    /// incomplete
    fn save(&self, session: &dyn Session) -> ModelResult<()> {
        self.to_record().save(session)
    }

    /// Remove the row addressed by this model's key
    fn delete(&self, session: &dyn Session) -> ModelResult<()> {
        self.to_record().delete(session)
    }
}

// Every Model gets the persistence protocol
impl<T: Model> Persistence for T {}
