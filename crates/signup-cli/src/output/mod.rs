//! Output formatting helpers for the CLI.
//!
//! Documents render as JSON, key-value lines, or a table depending on the
//! resolved output mode.

mod json;
mod text;

pub use json::{document_json, documents_json};
pub use text::{print_document, print_document_list};
