//! Store access layer.
//!
//! `DatabaseManager` owns one backend handle and exposes validated
//! create/read/update/delete/query operations over named collections.
//! Every operation returns `Result`; failures are logged here and then
//! propagated, so callers can always tell "empty" from "failed".

use serde_json::Value;

use crate::error::{Result, SignupError};
use crate::storage::types::{format_timestamp, CREATED_AT_FIELD, UPDATED_AT_FIELD};
use crate::storage::validation::{collection_name, document_data, document_id};
use crate::storage::{Document, DocumentBackend, Fields, Filter, FilterOp};

/// Validated access to a document backend.
pub struct DatabaseManager<B: DocumentBackend> {
    backend: B,
}

impl<B: DocumentBackend> DatabaseManager<B> {
    pub fn new(backend: B) -> Self {
        tracing::debug!("database manager initialized");
        Self { backend }
    }

    /// The underlying backend handle.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Add a record to a collection under a generated identifier.
    ///
    /// `createdAt` and `updatedAt` are set from the backend clock and
    /// override any caller-supplied values.
    ///
    /// # Errors
    ///
    /// Returns `SignupError::Validation` if the collection name is blank or
    /// the data is empty; otherwise backend failures as `SignupError::Store`.
    pub fn add_document(&self, collection: &str, data: Fields) -> Result<String> {
        let collection = collection_name(collection)?;
        document_data(&data)?;
        let data = self.stamp_new(data);

        match self.backend.insert(collection, data) {
            Ok(id) => {
                tracing::info!(collection, id = %id, "document added");
                Ok(id)
            }
            Err(err) => {
                tracing::error!(collection, error = %err, "failed to add document");
                Err(into_store_error(err))
            }
        }
    }

    /// Add a record under a caller-chosen identifier.
    ///
    /// # Errors
    ///
    /// Returns `SignupError::AlreadyExists` if the identifier is taken.
    pub fn add_document_with_id(&self, collection: &str, id: &str, data: Fields) -> Result<()> {
        let collection = collection_name(collection)?;
        let id = document_id(id)?;
        document_data(&data)?;
        let data = self.stamp_new(data);

        match self.backend.insert_with_id(collection, id, data) {
            Ok(()) => {
                tracing::info!(collection, id, "document added");
                Ok(())
            }
            Err(err @ SignupError::AlreadyExists(_)) => {
                tracing::warn!(collection, id, "document id already taken");
                Err(err)
            }
            Err(err) => {
                tracing::error!(collection, id, error = %err, "failed to add document");
                Err(into_store_error(err))
            }
        }
    }

    /// Get a single record by identifier.
    pub fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let collection = collection_name(collection)?;
        let id = document_id(id)?;
        self.backend.get(collection, id).map_err(|err| {
            tracing::error!(collection, id, error = %err, "failed to get document");
            into_store_error(err)
        })
    }

    /// Fetch every record of a collection, each with its identifier.
    pub fn fetch_collection(&self, collection: &str) -> Result<Vec<Document>> {
        let collection = collection_name(collection)?;
        match self.backend.list(collection) {
            Ok(docs) => {
                tracing::debug!(collection, count = docs.len(), "fetched collection");
                Ok(docs)
            }
            Err(err) => {
                tracing::error!(collection, error = %err, "failed to fetch collection");
                Err(into_store_error(err))
            }
        }
    }

    /// Query a collection with a single `field <op> value` filter.
    ///
    /// # Errors
    ///
    /// Returns `SignupError::Validation` for a blank collection or field and
    /// for a list operator without a 1 to 10 element array value. A backend
    /// failure is `SignupError::Query` carrying the parameters.
    pub fn query_collection(
        &self,
        collection: &str,
        field: &str,
        op: FilterOp,
        value: Value,
    ) -> Result<Vec<Document>> {
        let collection = collection_name(collection)?;
        let filter = Filter::new(field, op, value.clone())?;
        tracing::debug!(collection, field, op = %op, value = %value, "querying collection");

        match self.backend.query(collection, &filter) {
            Ok(docs) => {
                tracing::debug!(collection, count = docs.len(), "query executed");
                Ok(docs)
            }
            Err(err) => {
                tracing::error!(
                    collection,
                    field,
                    op = %op,
                    value = %value,
                    error = %err,
                    "query failed"
                );
                Err(SignupError::Query {
                    collection: collection.to_string(),
                    field: field.to_string(),
                    operator: op.to_string(),
                    value: value.to_string(),
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Merge `partial` into an existing record and refresh `updatedAt`.
    ///
    /// Caller-supplied `createdAt`/`updatedAt` values are dropped.
    ///
    /// # Errors
    ///
    /// Returns `SignupError::NotFound` if the record does not exist; the
    /// record is never created.
    pub fn update_document(&self, collection: &str, id: &str, mut partial: Fields) -> Result<()> {
        let collection = collection_name(collection)?;
        let id = document_id(id)?;
        document_data(&partial)?;

        partial.remove(CREATED_AT_FIELD);
        partial.insert(
            UPDATED_AT_FIELD.to_string(),
            Value::String(format_timestamp(self.backend.server_time())),
        );

        match self.backend.merge(collection, id, partial) {
            Ok(()) => {
                tracing::info!(collection, id, "document updated");
                Ok(())
            }
            Err(err @ SignupError::NotFound(_)) => {
                tracing::warn!(collection, id, "update target does not exist");
                Err(err)
            }
            Err(err) => {
                tracing::error!(collection, id, error = %err, "failed to update document");
                Err(into_store_error(err))
            }
        }
    }

    /// Delete a record. Deleting an absent record succeeds.
    pub fn delete_document(&self, collection: &str, id: &str) -> Result<()> {
        let collection = collection_name(collection)?;
        let id = document_id(id)?;
        match self.backend.delete(collection, id) {
            Ok(()) => {
                tracing::info!(collection, id, "document deleted");
                Ok(())
            }
            Err(err) => {
                tracing::error!(collection, id, error = %err, "failed to delete document");
                Err(into_store_error(err))
            }
        }
    }

    fn stamp_new(&self, mut data: Fields) -> Fields {
        let now = Value::String(format_timestamp(self.backend.server_time()));
        data.insert(CREATED_AT_FIELD.to_string(), now.clone());
        data.insert(UPDATED_AT_FIELD.to_string(), now);
        data
    }
}

/// Fold unexpected backend error kinds into `SignupError::Store`.
fn into_store_error(err: SignupError) -> SignupError {
    match err {
        SignupError::Store(_) | SignupError::NotFound(_) | SignupError::AlreadyExists(_) => err,
        other => SignupError::Store(other.to_string()),
    }
}
