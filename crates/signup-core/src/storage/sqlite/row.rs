//! Document row type for database queries.

use crate::error::{Result, SignupError};
use crate::storage::types::{Document, Fields};

/// Raw row data from the documents table, before parsing into domain types.
#[derive(Debug)]
pub struct DocumentRow {
    pub id: String,
    pub data_json: String,
}

impl DocumentRow {
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            data_json: row.get(1)?,
        })
    }
}

impl TryFrom<DocumentRow> for Document {
    type Error = SignupError;

    fn try_from(row: DocumentRow) -> Result<Self> {
        let fields: Fields = serde_json::from_str(&row.data_json).map_err(|e| {
            SignupError::Store(format!("Invalid JSON in document {}: {}", row.id, e))
        })?;
        Ok(Document::new(row.id, fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_parses_object() {
        let row = DocumentRow {
            id: "abc".to_string(),
            data_json: r#"{"email":"a@b.com","age":3}"#.to_string(),
        };
        let doc: Document = row.try_into().unwrap();
        assert_eq!(doc.id, "abc");
        assert_eq!(doc.get_str("email"), Some("a@b.com"));
    }

    #[test]
    fn test_row_rejects_non_object() {
        let row = DocumentRow {
            id: "abc".to_string(),
            data_json: "[1,2]".to_string(),
        };
        let result: Result<Document> = row.try_into();
        assert!(matches!(result, Err(SignupError::Store(_))));
    }
}
