//! Document backend trait definition.
//!
//! The `DocumentBackend` trait is the client handle the store access layer
//! is built on. Each method is one independent request against the backing
//! store; there are no transactions spanning calls.

use chrono::{DateTime, Utc};

use super::filter::Filter;
use super::types::{Document, Fields};
use crate::error::Result;

/// Primitive operations of a document store.
///
/// Implementations must ensure:
/// - Collections exist implicitly (created on first write)
/// - `list` and `query` return records in insertion order
/// - `merge` never creates a record
/// - `delete` of an absent record succeeds
pub trait DocumentBackend: Send + Sync {
    /// Insert a record under a freshly generated identifier.
    ///
    /// # Returns
    ///
    /// Returns the identifier assigned to the record.
    fn insert(&self, collection: &str, fields: Fields) -> Result<String>;

    /// Insert a record under a caller-chosen identifier.
    ///
    /// # Errors
    ///
    /// Returns `SignupError::AlreadyExists` if the identifier is taken.
    fn insert_with_id(&self, collection: &str, id: &str, fields: Fields) -> Result<()>;

    /// Get a record by identifier.
    ///
    /// Returns `Ok(None)` if the record does not exist.
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// List every record of a collection.
    fn list(&self, collection: &str) -> Result<Vec<Document>>;

    /// List the records of a collection that match `filter`.
    fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>>;

    /// Shallow-merge `fields` into an existing record.
    ///
    /// # Errors
    ///
    /// Returns `SignupError::NotFound` if the record does not exist.
    fn merge(&self, collection: &str, id: &str, fields: Fields) -> Result<()>;

    /// Delete a record. Deleting an absent record is not an error.
    fn delete(&self, collection: &str, id: &str) -> Result<()>;

    /// Clock used for server-assigned timestamps.
    fn server_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<B: DocumentBackend + ?Sized> DocumentBackend for std::sync::Arc<B> {
    fn insert(&self, collection: &str, fields: Fields) -> Result<String> {
        (**self).insert(collection, fields)
    }

    fn insert_with_id(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        (**self).insert_with_id(collection, id, fields)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        (**self).get(collection, id)
    }

    fn list(&self, collection: &str) -> Result<Vec<Document>> {
        (**self).list(collection)
    }

    fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        (**self).query(collection, filter)
    }

    fn merge(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        (**self).merge(collection, id, fields)
    }

    fn delete(&self, collection: &str, id: &str) -> Result<()> {
        (**self).delete(collection, id)
    }

    fn server_time(&self) -> DateTime<Utc> {
        (**self).server_time()
    }
}
