//! Model System - dynamic records and the typed capability layer
//!
//! - `record`: the dynamic model instance bound to a schema
//! - `core_trait`: the `Model` capability interface
//! - `persistence`: blanket find/load/save/delete over any `Model`

pub mod core_trait;
pub mod persistence;
pub mod record;

pub use core_trait::Model;
pub use persistence::Persistence;
pub use record::Record;
