//! Core data types for the storage layer.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Field map of a single record.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Reserved name of the record identifier.
pub const ID_FIELD: &str = "id";

/// Server-assigned creation timestamp field.
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Server-assigned modification timestamp field.
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// A stored record: its store-assigned identifier plus loosely typed fields.
///
/// Serializes flat, as `{"id": ..., <fields>...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier assigned by the store (or chosen by the caller on keyed writes)
    pub id: String,

    /// Field values
    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Look up a field value.
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.fields.get(field)
    }

    /// Look up a string field.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_str())
    }

    /// Server-assigned creation time, if present and well-formed.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.get_str(CREATED_AT_FIELD).and_then(parse_timestamp)
    }

    /// Server-assigned last modification time, if present and well-formed.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.get_str(UPDATED_AT_FIELD).and_then(parse_timestamp)
    }
}

/// Encode a timestamp the way the store persists it.
///
/// Fixed millisecond precision with a `Z` suffix keeps lexicographic order
/// equal to chronological order, so range filters work on the raw strings.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
