use serde_json::json;
use tempfile::tempdir;

use signup_core::storage::{Fields, FilterOp, SqliteBackend};
use signup_core::{DatabaseManager, SignupError};

fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().expect("object literal")
}

#[test]
fn test_records_survive_reopen() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("store.db");

    let id = {
        let db = DatabaseManager::new(SqliteBackend::open(&path).expect("open should succeed"));
        db.add_document("users", fields(json!({"username": "u", "email": "a@b.com"})))
            .expect("add should succeed")
    };
    assert!(path.exists());

    let db = DatabaseManager::new(SqliteBackend::open(&path).expect("reopen should succeed"));
    let docs = db.fetch_collection("users").expect("fetch should succeed");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, id);
    assert_eq!(docs[0].get_str("email"), Some("a@b.com"));
    assert!(docs[0].created_at().is_some());
}

#[test]
fn test_add_update_get_round_trip() {
    let dir = tempdir().expect("tempdir");
    let db = DatabaseManager::new(
        SqliteBackend::open(&dir.path().join("store.db")).expect("open should succeed"),
    );

    let id = db
        .add_document("profiles", fields(json!({"name": "Ada", "age": 36, "active": true})))
        .expect("add should succeed");
    db.update_document("profiles", &id, fields(json!({"age": 37, "city": "London"})))
        .expect("update should succeed");

    let doc = db
        .get_document("profiles", &id)
        .expect("get should succeed")
        .expect("document should exist");

    let mut keys: Vec<&str> = doc.fields.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["active", "age", "city", "createdAt", "name", "updatedAt"]
    );
    assert_eq!(doc.get("age"), Some(&json!(37)));
    assert_eq!(doc.get("name"), Some(&json!("Ada")));
    assert_eq!(doc.get("city"), Some(&json!("London")));
    assert!(doc.updated_at() >= doc.created_at());
}

#[test]
fn test_update_absent_document_is_not_found() {
    let dir = tempdir().expect("tempdir");
    let db = DatabaseManager::new(
        SqliteBackend::open(&dir.path().join("store.db")).expect("open should succeed"),
    );

    let err = db
        .update_document("profiles", "missing", fields(json!({"a": 1})))
        .expect_err("update should fail");
    assert!(matches!(err, SignupError::NotFound(_)));
    assert!(db.fetch_collection("profiles").expect("fetch").is_empty());
}

#[test]
fn test_query_and_delete() {
    let dir = tempdir().expect("tempdir");
    let db = DatabaseManager::new(
        SqliteBackend::open(&dir.path().join("store.db")).expect("open should succeed"),
    );

    let keep = db
        .add_document("users", fields(json!({"email": "a@b.com", "roles": ["admin"]})))
        .expect("add");
    let drop = db
        .add_document("users", fields(json!({"email": "c@d.com", "roles": ["viewer"]})))
        .expect("add");

    let admins = db
        .query_collection("users", "roles", FilterOp::ArrayContains, json!("admin"))
        .expect("query should succeed");
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].id, keep);

    db.delete_document("users", &drop).expect("delete should succeed");
    db.delete_document("users", &drop)
        .expect("second delete should succeed");

    let remaining = db.fetch_collection("users").expect("fetch");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep);
}

#[test]
fn test_open_rejects_non_database_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("garbage.db");
    std::fs::write(&path, b"this is not a sqlite database, just text padding it out")
        .expect("write");

    assert!(SqliteBackend::open(&path).is_err());
}
