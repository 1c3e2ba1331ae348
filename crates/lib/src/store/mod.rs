//! Document store abstraction
//!
//! The gateway talks to storage only through the [`DocumentStore`] trait:
//! named collections of JSON object documents, exact-match filters, and
//! three operations (insert, find-one, conditional update). Each call is
//! applied atomically by the store; nothing spans calls.
//!
//! [`InMemory`] is the bundled implementation, with JSON file persistence.

use std::any::Any;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::Result;

pub mod errors;
pub mod in_memory;
#[cfg(any(test, feature = "testing"))]
pub mod spy;

pub use errors::StoreError;
pub use in_memory::InMemory;
#[cfg(any(test, feature = "testing"))]
pub use spy::SpyStore;

/// A stored document: a JSON object keyed by field name.
pub type Document = serde_json::Map<String, Value>;

/// Serialize a record into a document.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document> {
    match serde_json::to_value(value)
        .map_err(|e| StoreError::SerializationFailed { source: e })?
    {
        Value::Object(document) => Ok(document),
        other => Err(StoreError::InvalidDocument {
            reason: format!("expected a JSON object, got {other}"),
        }
        .into()),
    }
}

/// Deserialize a document into a record.
pub fn from_document<T: DeserializeOwned>(document: Document) -> serde_json::Result<T> {
    serde_json::from_value(Value::Object(document))
}

/// Exact-match predicate over named fields.
///
/// A document matches when every field in the filter is present in the
/// document with an equal value. A `null` filter value also matches a
/// document that lacks the field. An empty filter matches every document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    fields: Document,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    pub fn field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.fields
            .iter()
            .all(|(field, value)| document.get(field).unwrap_or(&Value::Null) == value)
    }

    pub fn fields(&self) -> &Document {
        &self.fields
    }
}

/// Storage backend for comicstore documents.
///
/// Implementations must apply each individual call atomically. Uniqueness is
/// enforced by the store through [`ensure_unique_index`](Self::ensure_unique_index)
/// so that a check-then-insert race in the caller cannot create duplicates.
///
/// All implementations must be `Send` and `Sync` to allow sharing across tasks,
/// and implement `Any` to allow for downcasting if needed.
#[async_trait]
pub trait DocumentStore: Send + Sync + Any {
    /// Declare that no two documents in `collection` may share the same
    /// values for `fields`. Declaring an existing index again is a no-op.
    ///
    /// Fails with `StoreError::DuplicateKey` if existing documents already
    /// violate the index.
    async fn ensure_unique_index(&self, collection: &str, fields: &[&str]) -> Result<()>;

    /// Append a document to a collection.
    ///
    /// Fails with `StoreError::DuplicateKey` when a unique index would be violated.
    async fn insert(&self, collection: &str, document: Document) -> Result<()>;

    /// Return the first document matching `filter`, if any.
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>>;

    /// Overwrite `fields` on the first document matching `filter`, leaving its
    /// other fields alone.
    ///
    /// # Returns
    /// The number of documents updated: 0 when nothing matched, otherwise 1.
    async fn update_one(&self, collection: &str, filter: &Filter, fields: Document) -> Result<u64>;

    /// Returns a reference to self as Any for downcasting
    fn as_any(&self) -> &dyn Any;
}
