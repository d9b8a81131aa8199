use std::sync::{Arc, Mutex};

use serde_json::json;

use signup_core::storage::{Document, Fields, Filter, MemoryBackend};
use signup_core::{
    CredentialHasher, DatabaseManager, DocumentBackend, Result, SignInStatus, SignUpPolicy,
    SignUpStatus, SignUpWorkflow, SignupError,
};

/// Backend calls observed by `RecordingBackend`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Insert,
    InsertWithId,
    Get,
    List,
    Query,
    Merge,
    Delete,
}

/// Wraps a memory backend, recording every request and optionally failing
/// queries or writes.
#[derive(Default)]
struct RecordingBackend {
    inner: MemoryBackend,
    calls: Mutex<Vec<Call>>,
    fail_queries: bool,
    fail_writes: bool,
}

impl RecordingBackend {
    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn unavailable() -> SignupError {
        SignupError::Store("backend unavailable".to_string())
    }
}

impl DocumentBackend for RecordingBackend {
    fn insert(&self, collection: &str, fields: Fields) -> Result<String> {
        self.record(Call::Insert);
        if self.fail_writes {
            return Err(Self::unavailable());
        }
        self.inner.insert(collection, fields)
    }

    fn insert_with_id(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        self.record(Call::InsertWithId);
        if self.fail_writes {
            return Err(Self::unavailable());
        }
        self.inner.insert_with_id(collection, id, fields)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.record(Call::Get);
        self.inner.get(collection, id)
    }

    fn list(&self, collection: &str) -> Result<Vec<Document>> {
        self.record(Call::List);
        self.inner.list(collection)
    }

    fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        self.record(Call::Query);
        if self.fail_queries {
            return Err(Self::unavailable());
        }
        self.inner.query(collection, filter)
    }

    fn merge(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        self.record(Call::Merge);
        self.inner.merge(collection, id, fields)
    }

    fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.record(Call::Delete);
        self.inner.delete(collection, id)
    }
}

fn fast_hasher() -> CredentialHasher {
    CredentialHasher::with_params(8, 1, 1).expect("valid params")
}

fn workflow(
    backend: Arc<RecordingBackend>,
    policy: SignUpPolicy,
) -> SignUpWorkflow<Arc<RecordingBackend>> {
    SignUpWorkflow::new(DatabaseManager::new(backend), policy, fast_hasher())
}

#[test]
fn test_empty_fields_never_touch_store() {
    let backend = Arc::new(RecordingBackend::default());
    let flow = workflow(backend.clone(), SignUpPolicy::default());

    for (u, e, p) in [("", "", ""), ("", "a@b.com", "p"), ("u", "", "p"), ("u", "a@b.com", "")] {
        let outcome = flow.sign_up(u, e, p);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "All fields are required");
    }
    assert!(backend.calls().is_empty());
}

#[test]
fn test_invalid_email_never_touches_store() {
    let backend = Arc::new(RecordingBackend::default());
    let flow = workflow(backend.clone(), SignUpPolicy::default());

    for email in ["plainaddress", "user.example.com", " "] {
        let outcome = flow.sign_up("u", email, "p");
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Invalid email address");
    }
    assert!(backend.calls().is_empty());
}

#[test]
fn test_existing_email_is_rejected() {
    let backend = Arc::new(RecordingBackend::default());
    backend
        .inner
        .insert(
            "users",
            json!({"username": "first", "email": "a@b.com"})
                .as_object()
                .cloned()
                .expect("object"),
        )
        .expect("seed insert");
    let flow = workflow(backend.clone(), SignUpPolicy::default());

    let outcome = flow.sign_up("u", "a@b.com", "p");
    assert!(!outcome.success);
    assert_eq!(outcome.message, "Email already registered");
    assert_eq!(backend.calls(), vec![Call::Query]);
}

#[test]
fn test_fresh_email_queries_once_then_writes_once() {
    let backend = Arc::new(RecordingBackend::default());
    let flow = workflow(backend.clone(), SignUpPolicy::default());

    let outcome = flow.sign_up("u", "a@b.com", "p");
    assert!(outcome.success);
    assert_eq!(outcome.message, "Sign-up successful!");
    assert_eq!(backend.calls(), vec![Call::Query, Call::Insert]);
}

#[test]
fn test_query_failure_maps_to_lookup_message() {
    let backend = Arc::new(RecordingBackend {
        fail_queries: true,
        ..RecordingBackend::default()
    });
    let flow = workflow(backend.clone(), SignUpPolicy::default());

    let outcome = flow.sign_up("u", "a@b.com", "p");
    assert!(!outcome.success);
    assert_eq!(outcome.message, "Error checking email. Please try again.");
    assert_eq!(backend.calls(), vec![Call::Query]);
}

#[test]
fn test_write_failure_maps_to_sign_up_message() {
    let backend = Arc::new(RecordingBackend {
        fail_writes: true,
        ..RecordingBackend::default()
    });
    let flow = workflow(backend.clone(), SignUpPolicy::default());

    let outcome = flow.sign_up("u", "a@b.com", "p");
    assert!(!outcome.success);
    assert_eq!(outcome.status, SignUpStatus::WriteFailed);
    assert_eq!(outcome.message, "Error signing up. Please try again.");
}

#[test]
fn test_retry_after_failure_reruns_uniqueness_check() {
    let backend = Arc::new(RecordingBackend {
        fail_writes: true,
        ..RecordingBackend::default()
    });
    let flow = workflow(backend.clone(), SignUpPolicy::default());
    assert!(!flow.sign_up("u", "a@b.com", "p").success);
    assert!(!flow.sign_up("u", "a@b.com", "p").success);

    assert_eq!(
        backend.calls(),
        vec![Call::Query, Call::Insert, Call::Query, Call::Insert]
    );
}

#[test]
fn test_key_by_email_rejects_case_variant_at_write() {
    let backend = Arc::new(RecordingBackend::default());
    let policy = SignUpPolicy {
        key_by_email: true,
        ..SignUpPolicy::default()
    };
    let flow = workflow(backend.clone(), policy);

    assert!(flow.sign_up("u", "a@b.com", "p").success);
    // Query on the raw address misses; the keyed insert catches it.
    let outcome = flow.sign_up("v", "A@B.COM", "q");
    assert_eq!(outcome.status, SignUpStatus::EmailTaken);
    assert_eq!(outcome.message, "Email already registered");
    assert_eq!(
        backend.calls(),
        vec![
            Call::Query,
            Call::InsertWithId,
            Call::Query,
            Call::InsertWithId
        ]
    );
    assert_eq!(backend.inner.len("users").expect("len"), 1);
}

#[test]
fn test_stored_record_verifies_with_hasher() {
    let backend = Arc::new(RecordingBackend::default());
    let flow = workflow(backend.clone(), SignUpPolicy::default());

    let outcome = flow.sign_up("u", "a@b.com", "correct horse");
    let id = outcome.user_id.expect("user id");
    let doc = backend
        .inner
        .get("users", &id)
        .expect("get")
        .expect("stored record");

    let hash = doc.get_str("passwordHash").expect("hash field");
    let hasher = fast_hasher();
    assert!(hasher.verify("correct horse", hash).expect("verify"));
    assert!(!hasher.verify("wrong", hash).expect("verify"));
}

#[test]
fn test_key_by_email_accepts_slash_in_address() {
    let backend = Arc::new(RecordingBackend::default());
    let policy = SignUpPolicy {
        key_by_email: true,
        ..SignUpPolicy::default()
    };
    let flow = workflow(backend.clone(), policy);

    let outcome = flow.sign_up("u", "a/b@c.com", "p");
    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.user_id.as_deref(), Some("a%2Fb@c.com"));

    let doc = backend
        .inner
        .get("users", "a%2Fb@c.com")
        .expect("get")
        .expect("stored record");
    assert_eq!(doc.get_str("email"), Some("a/b@c.com"));

    let again = flow.sign_up("v", "A/B@C.COM", "q");
    assert_eq!(again.status, SignUpStatus::EmailTaken);
}

#[test]
fn test_sign_in_queries_once_and_verifies() {
    let backend = Arc::new(RecordingBackend::default());
    let flow = workflow(backend.clone(), SignUpPolicy::default());
    let registered = flow.sign_up("u", "a@b.com", "correct horse");
    assert!(registered.success);
    let before = backend.calls().len();

    let outcome = flow.sign_in("a@b.com", "correct horse");
    assert!(outcome.success);
    assert_eq!(outcome.user_id, registered.user_id);
    assert_eq!(backend.calls()[before..], [Call::Query]);

    let wrong = flow.sign_in("a@b.com", "battery staple");
    assert_eq!(wrong.status, SignInStatus::InvalidCredentials);
    assert_eq!(wrong.message, "Invalid email or password");
}

#[test]
fn test_sign_in_empty_fields_never_touch_store() {
    let backend = Arc::new(RecordingBackend::default());
    let flow = workflow(backend.clone(), SignUpPolicy::default());

    let outcome = flow.sign_in("", "p");
    assert_eq!(outcome.message, "All fields are required");
    assert!(backend.calls().is_empty());
}

#[test]
fn test_sign_in_lookup_failure_message() {
    let backend = Arc::new(RecordingBackend {
        fail_queries: true,
        ..RecordingBackend::default()
    });
    let flow = workflow(backend.clone(), SignUpPolicy::default());

    let outcome = flow.sign_in("a@b.com", "p");
    assert_eq!(outcome.status, SignInStatus::LookupFailed);
    assert_eq!(outcome.message, "Error signing in. Please try again.");
}

#[test]
fn test_sign_in_keyed_by_email_uses_point_read() {
    let backend = Arc::new(RecordingBackend::default());
    let policy = SignUpPolicy {
        key_by_email: true,
        ..SignUpPolicy::default()
    };
    let flow = workflow(backend.clone(), policy);
    assert!(flow.sign_up("u", "a@b.com", "pw").success);
    let before = backend.calls().len();

    assert!(flow.sign_in("A@B.com", "pw").success);
    assert_eq!(backend.calls()[before..], [Call::Get]);
}
