//! In-memory document store implementation
//!
//! This module provides an in-memory implementation of the DocumentStore trait,
//! suitable for testing, development, or scenarios where data persistence
//! is handled by saving and loading the whole state as a JSON file.

mod persistence;

use std::any::Any;
use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Document, DocumentStore, Filter, StoreError};
use crate::Result;

/// A unique index: the field names whose combined values must be distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct UniqueIndex {
    pub(crate) fields: Vec<String>,
}

impl UniqueIndex {
    /// Values of the indexed fields in a document, or `None` when any of
    /// them is missing. Documents without a key are not indexed.
    fn key(&self, document: &Document) -> Option<Vec<Value>> {
        self.fields
            .iter()
            .map(|field| document.get(field).cloned())
            .collect()
    }
}

/// Collections and their indexes, guarded together so every call sees a
/// consistent view.
#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) collections: HashMap<String, Vec<Document>>,
    pub(crate) indexes: HashMap<String, Vec<UniqueIndex>>,
}

impl State {
    /// Index of `collection` violated if `candidate` were stored, ignoring the
    /// document at position `skip` (the one being replaced).
    fn violated_index(
        &self,
        collection: &str,
        candidate: &Document,
        skip: Option<usize>,
    ) -> Option<&UniqueIndex> {
        let indexes = self.indexes.get(collection)?;
        let documents = self.collections.get(collection)?;

        indexes.iter().find(|index| {
            let Some(key) = index.key(candidate) else {
                return false;
            };
            documents
                .iter()
                .enumerate()
                .filter(|(position, _)| Some(*position) != skip)
                .any(|(_, existing)| index.key(existing).as_ref() == Some(&key))
        })
    }
}

fn duplicate_key(collection: &str, index: &UniqueIndex) -> crate::Error {
    StoreError::DuplicateKey {
        collection: collection.to_string(),
        fields: index.fields.clone(),
    }
    .into()
}

/// A simple in-memory document store using a `HashMap` of collections.
///
/// It provides basic persistence capabilities via `save_to_file` and
/// `load_from_file`, serializing all collections and indexes to JSON.
#[derive(Debug, Default)]
pub struct InMemory {
    pub(crate) state: RwLock<State>,
}

impl InMemory {
    /// Creates a new, empty `InMemory` store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        let state = self.state.read().await;
        state.collections.get(collection).map_or(0, Vec::len)
    }

    /// Saves the entire store state to a specified file as JSON.
    ///
    /// # Arguments
    /// * `path` - The path to the file where the state should be saved.
    ///
    /// # Returns
    /// A `Result` indicating success or an I/O or serialization error.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        persistence::save_to_file(self, path).await
    }

    /// Loads the store state from a specified JSON file.
    ///
    /// If the file does not exist, a new, empty `InMemory` store is returned.
    ///
    /// # Arguments
    /// * `path` - The path to the file from which to load the state.
    ///
    /// # Returns
    /// A `Result` containing the loaded `InMemory` store or an I/O or deserialization error.
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        persistence::load_from_file(path).await
    }
}

#[async_trait]
impl DocumentStore for InMemory {
    async fn ensure_unique_index(&self, collection: &str, fields: &[&str]) -> Result<()> {
        let index = UniqueIndex {
            fields: fields.iter().map(|f| f.to_string()).collect(),
        };

        let mut state = self.state.write().await;
        if state
            .indexes
            .get(collection)
            .is_some_and(|existing| existing.contains(&index))
        {
            return Ok(());
        }

        if let Some(documents) = state.collections.get(collection) {
            let mut seen = Vec::with_capacity(documents.len());
            for key in documents.iter().filter_map(|document| index.key(document)) {
                if seen.contains(&key) {
                    return Err(duplicate_key(collection, &index));
                }
                seen.push(key);
            }
        }

        tracing::debug!(collection, fields = ?index.fields, "Created unique index");
        state
            .indexes
            .entry(collection.to_string())
            .or_default()
            .push(index);
        Ok(())
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<()> {
        let mut state = self.state.write().await;

        if let Some(index) = state.violated_index(collection, &document, None) {
            return Err(duplicate_key(collection, index));
        }

        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>> {
        let state = self.state.read().await;
        Ok(state
            .collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|d| filter.matches(d)))
            .cloned())
    }

    async fn update_one(&self, collection: &str, filter: &Filter, fields: Document) -> Result<u64> {
        let mut state = self.state.write().await;

        let Some((position, mut updated)) = state.collections.get(collection).and_then(|documents| {
            documents
                .iter()
                .enumerate()
                .find(|(_, d)| filter.matches(d))
                .map(|(position, d)| (position, d.clone()))
        }) else {
            return Ok(0);
        };
        updated.extend(fields);

        if let Some(index) = state.violated_index(collection, &updated, Some(position)) {
            return Err(duplicate_key(collection, index));
        }

        if let Some(slot) = state
            .collections
            .get_mut(collection)
            .and_then(|documents| documents.get_mut(position))
        {
            *slot = updated;
        }
        Ok(1)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
