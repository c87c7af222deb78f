//! Typed model journey: declare a schema, implement `Model`, and drive the
//! persistence protocol end to end against the in-memory store.

use once_cell::sync::Lazy;
use uuid::Uuid;

use widerow::{
    AttributeKind, MemorySession, Model, ModelError, ModelResult, Persistence, Record, Schema,
    Value,
};

static COMPANY_SCHEMA: Lazy<Schema> = Lazy::new(|| {
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

#[derive(Debug, Clone, PartialEq)]
struct Company {
    id: Option<Uuid>,
    name: Option<String>,
    score: Option<i64>,
    founded: Option<i64>,
    founder: Option<String>,
}

impl Model for Company {
    fn schema() -> &'static Schema {
        &COMPANY_SCHEMA
    }

    fn from_record(record: Record) -> ModelResult<Self> {
        Ok(Company {
            id: record.get("id").as_uuid(),
            name: record.get("name").as_text().map(String::from),
            score: record.get("score").as_int(),
            founded: record.get("founded").as_int(),
            founder: record.get("founder").as_text().map(String::from),
        })
    }

    fn to_record(&self) -> Record {
        Record::new(
            Self::schema(),
            [
                ("id", Value::from(self.id)),
                ("name", Value::from(self.name.clone())),
                ("score", Value::from(self.score)),
                ("founded", Value::from(self.founded)),
                ("founder", Value::from(self.founder.clone())),
            ],
        )
    }
}

fn company_store() -> MemorySession {
    let store = MemorySession::new();
    store.create_table("companies", ["id", "score"]);
    store
}

#[test]
fn saved_company_is_found_equal_by_its_key() {
    let store = company_store();
    let company = Company {
        id: Some(Uuid::new_v4()),
        name: Some("Job Place".to_string()),
        score: Some(101),
        founded: None,
        founder: None,
    };

    company.save(&store).unwrap();

    let found = Company::find(&store, company.to_record().key())
        .unwrap()
        .expect("saved row should be found");
    assert_eq!(found, company);
}

#[test]
fn load_overlays_explicit_values_on_the_stored_row() {
    let store = company_store();
    let id = Uuid::new_v4();
    Company {
        id: Some(id),
        name: Some("Funky".to_string()),
        score: Some(101),
        founded: Some(1990),
        founder: None,
    }
    .save(&store)
    .unwrap();

    let merged = Company::load(
        &store,
        [
            ("id", Value::Uuid(id)),
            ("score", Value::Int(101)),
            ("name", Value::from("Google")),
            ("founder", Value::from("Larry Brin")),
        ],
    )
    .unwrap()
    .expect("base row should exist");

    assert_eq!(
        merged,
        Company {
            id: Some(id),
            name: Some("Google".to_string()),
            score: Some(101),
            founded: Some(1990),
            founder: Some("Larry Brin".to_string()),
        }
    );
}

#[test]
fn keyless_company_save_is_a_silent_noop() {
    let store = company_store();
    let company = Company {
        id: None,
        name: Some("Keyless Inc.".to_string()),
        score: None,
        founded: None,
        founder: None,
    };

    company.save(&store).unwrap();

    assert_eq!(store.execution_count(), 0);
    assert_eq!(store.row_count("companies"), 0);
}

#[test]
fn find_or_fail_reports_not_found() {
    let store = company_store();

    let err = Company::find_or_fail(
        &store,
        [("id", Value::Uuid(Uuid::new_v4())), ("score", Value::Int(3))],
    )
    .unwrap_err();

    assert!(matches!(err, ModelError::NotFound(_)));
}

#[test]
fn delete_then_find_misses() {
    let store = company_store();
    let company = Company {
        id: Some(Uuid::new_v4()),
        name: Some("Shortlived".to_string()),
        score: Some(7),
        founded: None,
        founder: None,
    };
    company.save(&store).unwrap();

    company.delete(&store).unwrap();

    assert!(Company::find(&store, company.to_record().key())
        .unwrap()
        .is_none());
}
