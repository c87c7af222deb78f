//! Query Builder Module - key-validated statement construction and execution

pub mod builder;
pub(crate) mod executor;
pub mod statement;

pub use builder::QueryBuilder;
pub use statement::{Statement, StatementKind};
