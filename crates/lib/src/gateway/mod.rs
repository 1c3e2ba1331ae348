//! Persistence gateway
//!
//! The [`Gateway`] owns a handle to a [`DocumentStore`] and exposes the async
//! operations callers use to register users and build comics. It translates
//! between the domain types in [`user`](crate::user) and [`comic`](crate::comic)
//! and their stored documents.
//!
//! ## Consistency
//!
//! The store applies each call atomically but offers no transactions. Comic
//! updates are therefore read-modify-write cycles guarded by the document's
//! `revision` field: the write only lands if the revision is still the one
//! that was read, and a cycle that loses the race starts over from a fresh
//! read. Every write replaces `pages` and `panelMap` together, so readers
//! never observe one without the other.

mod comics;
mod users;

use std::sync::Arc;

use crate::{
    Result,
    config::GatewayConfig,
    constants::{CANONICAL_URI, COMICS, CREATOR, USERNAME, USERS},
    store::DocumentStore,
};

/// Entry point for all user and comic persistence operations.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct Gateway {
    store: Arc<dyn DocumentStore>,
    config: GatewayConfig,
}

impl Gateway {
    /// Open a gateway over `store`, creating the unique indexes it relies on.
    ///
    /// # Errors
    /// Fails if the store is unreachable, or if existing data already holds
    /// duplicate usernames or duplicate comics for one creator.
    pub async fn open(store: Arc<dyn DocumentStore>, config: GatewayConfig) -> Result<Self> {
        store.ensure_unique_index(USERS, &[USERNAME]).await?;
        store
            .ensure_unique_index(COMICS, &[CANONICAL_URI, CREATOR])
            .await?;

        tracing::debug!(
            max_update_retries = config.max_update_retries,
            "Gateway opened"
        );
        Ok(Self { store, config })
    }

    /// The underlying document store.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
