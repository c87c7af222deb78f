//! Crate-level test suite
//!
//! Exercises the mapping protocol end to end against the in-memory store,
//! without a live column-family cluster.


use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::schema::Schema;
use crate::store::MemorySession;
use crate::value::{AttributeKind, Value};

/// The canonical fixture: a company addressed by (id, score), with a
/// generated surrogate id.
pub(crate) static COMPANY: Lazy<Schema> = Lazy::new(|| {
    Schema::builder()
        .attribute_with_generator("id", AttributeKind::Uuid, || Value::Uuid(Uuid::new_v4()))
        .attribute("name", AttributeKind::Text)
        .attribute("score", AttributeKind::Int)
        .attribute("founded", AttributeKind::Int)
        .attribute("founder", AttributeKind::Text)
        .table("companies")
        .key(["id", "score"])
        .build()
});

pub(crate) fn company_store() -> MemorySession {
    let store = MemorySession::new();
    store.create_table("companies", ["id", "score"]);
    store
}
