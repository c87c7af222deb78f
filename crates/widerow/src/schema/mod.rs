//! Schema System - Declarative per-model attribute registry
//!
//! A schema is declared once per model type, validated at build time, and
//! immutable afterwards, so any number of threads may read it without
//! synchronization. Model types keep theirs in a `once_cell::sync::Lazy`
//! static.
//!
//! - `attribute`: attribute definitions and default providers
//! - `definition`: the frozen `Schema`
//! - `builder`: fluent declaration with fail-fast validation

pub mod attribute;
pub mod builder;
pub mod definition;

pub use attribute::{AttributeDefault, AttributeDefinition};
pub use builder::SchemaBuilder;
pub use definition::Schema;
