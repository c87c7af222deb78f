//! # widerow: object mapping for wide-column stores
//!
//! A lightweight mapping layer between typed, in-memory model objects and
//! rows in a column-family store addressed by composite partition/clustering
//! keys. Declarative attribute schemas, composite-key validation, equality
//! semantics, and a find/load/save protocol translating between model
//! instances and store rows.
//!
//! The store itself is an external collaborator behind the [`Session`]
//! trait: statement in, rowset or error out. [`MemorySession`] is the
//! in-process reference implementation.

pub mod error;
pub mod model;
pub mod query;
pub mod schema;
pub mod store;
pub mod value;

#[cfg(test)]
mod tests;

// Re-export core traits and types
pub use error::{ModelError, ModelResult};
pub use model::{Model, Persistence, Record};
pub use query::{QueryBuilder, Statement, StatementKind};
pub use schema::{AttributeDefault, AttributeDefinition, Schema, SchemaBuilder};
pub use store::{MemorySession, Row, RowSet, Session, StoreError};
pub use value::{AttributeKind, Attributes, Value};
