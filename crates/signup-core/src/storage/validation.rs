//! Collection, identifier, and record data validation.

use crate::error::{Result, SignupError};
use crate::storage::types::{Fields, ID_FIELD};

/// Maximum bytes for a record's encoded JSON.
pub const MAX_DATA_BYTES: usize = 1024 * 1024;

/// Validate a collection name, returning it trimmed.
pub fn collection_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SignupError::Validation(
            "Collection name is required".to_string(),
        ));
    }
    if trimmed.contains('/') {
        return Err(SignupError::Validation(format!(
            "Collection name cannot contain '/': {}",
            trimmed
        )));
    }
    Ok(trimmed)
}

/// Validate a record identifier.
pub fn document_id(id: &str) -> Result<&str> {
    if id.trim().is_empty() {
        return Err(SignupError::Validation(
            "Document ID is required".to_string(),
        ));
    }
    if id.contains('/') {
        return Err(SignupError::Validation(format!(
            "Document ID cannot contain '/': {}",
            id
        )));
    }
    Ok(id)
}

/// Validate caller-supplied record data.
///
/// - Must contain at least one field
/// - Must not carry the reserved identifier field
/// - Must encode within `MAX_DATA_BYTES`
pub fn document_data(data: &Fields) -> Result<()> {
    if data.is_empty() {
        return Err(SignupError::Validation(
            "Document data is required".to_string(),
        ));
    }
    if data.contains_key(ID_FIELD) {
        return Err(SignupError::Validation(format!(
            "Field '{}' is reserved for the document identifier",
            ID_FIELD
        )));
    }
    if data.keys().any(|key| key.trim().is_empty()) {
        return Err(SignupError::Validation(
            "Field names cannot be empty".to_string(),
        ));
    }

    let encoded = serde_json::to_vec(data)?;
    if encoded.len() > MAX_DATA_BYTES {
        return Err(SignupError::Validation(format!(
            "Document data too large (max {} bytes)",
            MAX_DATA_BYTES
        )));
    }

    Ok(())
}
