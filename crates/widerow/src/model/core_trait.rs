//! Core Model Trait - capability interface for typed models
//!
//! Any type that can name its schema and convert to and from a [`Record`]
//! participates in the mapping layer; the engine operates purely over this
//! interface.

use crate::error::ModelResult;
use crate::schema::Schema;

use super::record::Record;

/// Capability interface implemented by typed model structs
pub trait Model: Sized {
    /// The immutable schema this model type is mapped with.
    ///
    /// Declared once per type, typically in a `once_cell::sync::Lazy`
    /// static, before any instance is constructed.
    fn schema() -> &'static Schema;

    /// Rebuild a typed model from a hydrated record
    fn from_record(record: Record) -> ModelResult<Self>;

    /// Snapshot this model as a record over its schema
    fn to_record(&self) -> Record;
}
