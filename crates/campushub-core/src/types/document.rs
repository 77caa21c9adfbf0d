//! Stored documents and the write-side field representation.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::result::AppResult;
use crate::types::id::DocumentId;

/// Field holding the server-assigned creation time.
pub const CREATED_AT: &str = "createdAt";
/// Field holding the server-assigned last update time.
pub const UPDATED_AT: &str = "updatedAt";

/// Raw document fields as stored.
pub type Fields = serde_json::Map<String, Value>;

/// Fields of a single write, keyed by field name.
pub type WriteFields = BTreeMap<String, FieldValue>;

/// A value in a write: either a literal or the server timestamp sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A literal JSON value.
    Value(Value),
    /// Resolved by the store to the commit time of the write.
    ServerTimestamp,
}

impl FieldValue {
    /// A trimmed string value.
    pub fn trimmed(value: &str) -> Self {
        Self::Value(Value::String(value.trim().to_string()))
    }

    /// A trimmed string value, or `null` when the trimmed value is empty.
    pub fn optional(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Self::Value(Value::Null)
        } else {
            Self::Value(Value::String(trimmed.to_string()))
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Value(Value::String(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Value(Value::from(value))
    }
}

/// Options for a `set` write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Merge into the existing document instead of replacing it.
    pub merge: bool,
}

impl SetOptions {
    /// Replace the whole document.
    pub fn overwrite() -> Self {
        Self { merge: false }
    }

    /// Merge the given fields into the existing document.
    pub fn merge() -> Self {
        Self { merge: true }
    }
}

/// A document as read from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document id within its collection.
    pub id: DocumentId,
    /// Stored fields.
    pub fields: Fields,
    /// When the document was first written.
    pub create_time: DateTime<Utc>,
    /// When the document was last written.
    pub update_time: DateTime<Utc>,
}

impl Document {
    /// Look up a single field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Decode the document into a typed record.
    ///
    /// The document id is injected as the `id` field; fields the record does
    /// not declare are dropped.
    pub fn decode<T: DeserializeOwned>(&self) -> AppResult<T> {
        let mut map = self.fields.clone();
        map.insert("id".to_string(), Value::String(self.id.as_str().to_string()));
        Ok(serde_json::from_value(Value::Object(map))?)
    }
}

/// Wire representation of a timestamp.
///
/// RFC 3339 in UTC with fixed nanosecond precision, so that lexical order
/// equals chronological order.
pub fn timestamp_value(ts: DateTime<Utc>) -> Value {
    Value::String(ts.to_rfc3339_opts(SecondsFormat::Nanos, true))
}
