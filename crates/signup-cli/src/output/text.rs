use serde_json::Value;
use signup_core::storage::{Document, CREATED_AT_FIELD, UPDATED_AT_FIELD};
use signup_core::PASSWORD_HASH_FIELD;

use crate::constants::REDACTED;
use crate::ui::{kv, print, table, Column, UiContext};

/// Display text for a field value. Credentials never reach the terminal.
fn display_value(key: &str, value: &Value) -> String {
    if key == PASSWORD_HASH_FIELD {
        return REDACTED.to_string();
    }
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Fields in display order: user fields sorted, then timestamps.
fn ordered_fields(doc: &Document) -> Vec<(&str, &Value)> {
    let mut user: Vec<(&str, &Value)> = doc
        .fields
        .iter()
        .filter(|(k, _)| k.as_str() != CREATED_AT_FIELD && k.as_str() != UPDATED_AT_FIELD)
        .map(|(k, v)| (k.as_str(), v))
        .collect();
    user.sort_by(|a, b| a.0.cmp(b.0));

    for key in [CREATED_AT_FIELD, UPDATED_AT_FIELD] {
        if let Some(value) = doc.fields.get(key) {
            user.push((key, value));
        }
    }
    user
}

/// One-line summary of a document's fields.
fn summary(doc: &Document) -> String {
    ordered_fields(doc)
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, display_value(k, v)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print a single document as key-value lines.
pub fn print_document(ctx: &UiContext, doc: &Document) {
    print(ctx, &kv(ctx, "id", &doc.id));
    for (key, value) in ordered_fields(doc) {
        print(ctx, &kv(ctx, key, &display_value(key, value)));
    }
}

/// Print a list of documents: a table when pretty, tab-separated otherwise.
pub fn print_document_list(ctx: &UiContext, docs: &[Document], quiet: bool) {
    if quiet {
        for doc in docs {
            print(ctx, &doc.id);
        }
        return;
    }

    if docs.is_empty() {
        if ctx.mode.is_pretty() {
            print(ctx, "No documents found.");
        }
        return;
    }

    let columns = [Column::new("ID"), Column::new("Fields")];
    let rows: Vec<Vec<String>> = docs
        .iter()
        .map(|doc| vec![doc.id.clone(), summary(doc)])
        .collect();
    print(ctx, &table(ctx, &columns, &rows));
}
