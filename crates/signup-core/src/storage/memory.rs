//! In-process document backend.
//!
//! Holds every collection in a `RwLock`ed map. Useful as a test double for
//! the access layer and for short-lived tooling that needs no persistence.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{Result, SignupError};
use crate::storage::filter::Filter;
use crate::storage::traits::DocumentBackend;
use crate::storage::types::{Document, Fields};

/// Document backend that keeps all records in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    fixed_time: Option<DateTime<Utc>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose server clock always reports `time`.
    pub fn with_fixed_time(time: DateTime<Utc>) -> Self {
        Self {
            collections: RwLock::default(),
            fixed_time: Some(time),
        }
    }

    /// Number of records in a collection.
    pub fn len(&self, collection: &str) -> Result<usize> {
        Ok(self.read()?.get(collection).map_or(0, Vec::len))
    }

    /// True when the collection holds no records.
    pub fn is_empty(&self, collection: &str) -> Result<bool> {
        Ok(self.len(collection)? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Vec<Document>>>> {
        self.collections
            .read()
            .map_err(|_| SignupError::Store("Memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Vec<Document>>>> {
        self.collections
            .write()
            .map_err(|_| SignupError::Store("Memory store lock poisoned".to_string()))
    }
}

impl DocumentBackend for MemoryBackend {
    fn insert(&self, collection: &str, fields: Fields) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.write()?
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id.clone(), fields));
        Ok(id)
    }

    fn insert_with_id(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let mut collections = self.write()?;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|doc| doc.id == id) {
            return Err(SignupError::AlreadyExists(format!(
                "Document {} in {}",
                id, collection
            )));
        }
        docs.push(Document::new(id, fields));
        Ok(())
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        Ok(self
            .read()?
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned())
    }

    fn list(&self, collection: &str) -> Result<Vec<Document>> {
        Ok(self.read()?.get(collection).cloned().unwrap_or_default())
    }

    fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        Ok(self
            .read()?
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).cloned().collect())
            .unwrap_or_default())
    }

    fn merge(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let mut collections = self.write()?;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| {
                SignupError::NotFound(format!("Document {} in {}", id, collection))
            })?;
        doc.fields.extend(fields);
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> Result<()> {
        if let Some(docs) = self.write()?.get_mut(collection) {
            docs.retain(|doc| doc.id != id);
        }
        Ok(())
    }

    fn server_time(&self) -> DateTime<Utc> {
        self.fixed_time.unwrap_or_else(Utc::now)
    }
}
