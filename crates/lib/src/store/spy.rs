//! Instrumented store wrapper for tests
//!
//! [`SpyStore`] delegates to an inner store while counting calls. It can also
//! fail every call, or simulate a competing writer that commits right
//! before a conditional update lands.

use std::any::Any;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use super::{Document, DocumentStore, Filter, InMemory, StoreError};
use crate::{Result, constants::REVISION};

/// A [`DocumentStore`] that records how it is used.
#[derive(Debug, Default)]
pub struct SpyStore {
    inner: InMemory,
    inserts: AtomicUsize,
    finds: AtomicUsize,
    updates: AtomicUsize,
    offline: AtomicBool,
    interference: AtomicU32,
    competing_write: Mutex<Option<(Filter, Document)>>,
}

impl SpyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of insert, find and update calls seen so far.
    pub fn calls(&self) -> usize {
        self.inserts() + self.finds() + self.updates()
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    /// Forget all recorded calls.
    pub fn reset(&self) {
        self.inserts.store(0, Ordering::SeqCst);
        self.finds.store(0, Ordering::SeqCst);
        self.updates.store(0, Ordering::SeqCst);
    }

    /// While set, every call fails with `StoreError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Make the next `count` revision-guarded updates lose a race: just before
    /// each one, the target document's revision is bumped as if another
    /// writer had committed first.
    pub fn interfere_with_next_updates(&self, count: u32) {
        self.interference.store(count, Ordering::SeqCst);
    }

    /// Apply `fields` to the document matching `filter` right before the
    /// next update lands, as another writer committing first would.
    pub fn stage_competing_write(&self, filter: Filter, fields: Document) {
        if let Ok(mut staged) = self.competing_write.lock() {
            *staged = Some((filter, fields));
        }
    }

    pub fn inner(&self) -> &InMemory {
        &self.inner
    }

    fn check_online(&self, operation: &str) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                reason: format!("{operation}: store offline"),
            }
            .into());
        }
        Ok(())
    }

    fn take_interference(&self) -> bool {
        self.interference
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    async fn bump_revision(&self, collection: &str, filter: &Filter) -> Result<()> {
        let mut unguarded = Filter::new();
        for (field, value) in filter.fields() {
            if field != REVISION {
                unguarded = unguarded.field(field.clone(), value.clone());
            }
        }

        let Some(current) = self.inner.find_one(collection, &unguarded).await? else {
            return Ok(());
        };
        let revision = current.get(REVISION).and_then(Value::as_u64).unwrap_or(0);

        let mut fields = Document::new();
        fields.insert(REVISION.to_string(), Value::from(revision + 1));
        self.inner.update_one(collection, &unguarded, fields).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SpyStore {
    async fn ensure_unique_index(&self, collection: &str, fields: &[&str]) -> Result<()> {
        self.check_online("ensure_unique_index")?;
        self.inner.ensure_unique_index(collection, fields).await
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<()> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check_online("insert")?;
        self.inner.insert(collection, document).await
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.check_online("find_one")?;
        self.inner.find_one(collection, filter).await
    }

    async fn update_one(&self, collection: &str, filter: &Filter, fields: Document) -> Result<u64> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.check_online("update_one")?;
        let staged = self
            .competing_write
            .lock()
            .ok()
            .and_then(|mut staged| staged.take());
        if let Some((competing_filter, competing_fields)) = staged {
            self.inner
                .update_one(collection, &competing_filter, competing_fields)
                .await?;
        }
        if filter.fields().contains_key(REVISION) && self.take_interference() {
            self.bump_revision(collection, filter).await?;
        }
        self.inner.update_one(collection, filter, fields).await
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
