use serde_json::Value;
use signup_core::storage::Document;

/// Convert a document to flat JSON (`{"id": ..., <fields>...}`).
pub fn document_json(doc: &Document) -> Value {
    let mut map = doc.fields.clone();
    map.insert("id".to_string(), Value::String(doc.id.clone()));
    Value::Object(map)
}

/// Convert multiple documents to a JSON array.
pub fn documents_json(docs: &[Document]) -> Value {
    Value::Array(docs.iter().map(document_json).collect())
}
