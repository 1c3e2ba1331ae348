//! Comic creation, lookup and revision-guarded updates

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::Gateway;
use crate::{
    Error, Result,
    comic::{Access, Comic, ComicError, ComicRecord, PanelId, canonical_uri},
    constants::{
        ADMINLIST, CANONICAL_URI, COMICS, CREATOR, EDITLIST, LEGACY_CANONICAL_URI,
        LEGACY_PANEL_MAP, PAGES, PANEL_MAP, REVISION, VIEWLIST,
    },
    store::{Document, Filter, StoreError},
};

/// Fields a revision-less document is compared on before it is overwritten.
const UNREVISED_GUARD: [&str; 6] = [
    PAGES,
    PANEL_MAP,
    LEGACY_PANEL_MAP,
    VIEWLIST,
    EDITLIST,
    ADMINLIST,
];

fn comic_filter(creator: &str, canonical: &str) -> Filter {
    Filter::new()
        .field(CANONICAL_URI, canonical)
        .field(CREATOR, creator)
}

fn legacy_comic_filter(creator: &str, canonical: &str) -> Filter {
    Filter::new()
        .field(LEGACY_CANONICAL_URI, canonical)
        .field(CREATOR, creator)
}

/// A comic as read from the store, with the filter that only matches the
/// document while it is still in the state that was read.
struct Snapshot {
    comic: Comic,
    revision: Option<u64>,
    guard: Filter,
    legacy_key: bool,
}

impl Snapshot {
    /// Build the write guard from the lookup key and the stored document.
    ///
    /// The stored revision must be unchanged (`null` matches a missing one).
    /// A document without a revision is also compared on every field a
    /// write may replace.
    fn new(comic: Comic, key: Filter, document: &Document) -> Self {
        let stored = |field: &str| document.get(field).cloned().unwrap_or(Value::Null);
        let revision = document.get(REVISION).and_then(Value::as_u64);

        let mut guard = key.field(REVISION, stored(REVISION));
        if revision.is_none() {
            for field in UNREVISED_GUARD {
                guard = guard.field(field, stored(field));
            }
        }

        Self {
            comic,
            revision,
            guard,
            legacy_key: !document.contains_key(CANONICAL_URI),
        }
    }
}

impl Gateway {
    /// Create a comic owned by `creator` and store it.
    ///
    /// The uri is derived from `name`. The creator becomes the only editor and
    /// admin; the view list, pages and panel map start empty.
    ///
    /// # Errors
    /// `ComicError::ComicAlreadyExists` if `creator` already has a comic with
    /// the same canonical uri.
    pub async fn create_comic(
        &self,
        name: impl Into<String>,
        creator: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Comic> {
        let comic = Comic::new(name, creator, description);
        let already_exists = || -> Error {
            ComicError::ComicAlreadyExists {
                creator: comic.creator().to_string(),
                uri: comic.canonical_uri().to_string(),
            }
            .into()
        };

        // Older documents are outside the unique index until their first update
        let legacy = legacy_comic_filter(comic.creator(), comic.canonical_uri());
        if self.store.find_one(COMICS, &legacy).await?.is_some() {
            return Err(already_exists());
        }

        let document = ComicRecord::new(&comic, 0).to_document()?;
        match self.store.insert(COMICS, document).await {
            Ok(()) => {}
            Err(Error::Store(StoreError::DuplicateKey { .. })) => return Err(already_exists()),
            Err(e) => return Err(e),
        }

        info!(
            creator = %comic.creator(),
            uri = %comic.canonical_uri(),
            "Created comic"
        );
        Ok(comic)
    }

    /// Look up a comic by creator and uri.
    ///
    /// The uri is canonicalized first, so any formatting of the same uri
    /// finds the comic. The returned comic includes its panel map.
    ///
    /// # Returns
    /// `Ok(None)` when the creator has no such comic.
    pub async fn fetch_comic(&self, creator: &str, uri: &str) -> Result<Option<Comic>> {
        let canonical = canonical_uri(uri);
        Ok(self
            .load_comic(creator, &canonical)
            .await?
            .map(|snapshot| snapshot.comic))
    }

    /// Append a panel to a page and return the panel's new id.
    ///
    /// `page_number` counts from 1. Pages are not created implicitly; use
    /// [`add_page`](Self::add_page) first.
    ///
    /// # Returns
    /// `Ok(None)` when the comic does not exist.
    ///
    /// # Errors
    /// - `ComicError::InvalidPageNumber` for page 0, before any store access
    /// - `ComicError::PageNotFound` when the page does not exist; nothing is written
    /// - `ComicError::UpdateConflict` when concurrent writers exhaust the retry budget
    pub async fn insert_panel(
        &self,
        creator: &str,
        uri: &str,
        page_number: usize,
        locator: &str,
    ) -> Result<Option<PanelId>> {
        if page_number < 1 {
            return Err(ComicError::InvalidPageNumber { page_number }.into());
        }

        let id = self
            .modify_comic(creator, uri, &[PAGES, PANEL_MAP], |comic| {
                comic.insert_panel(page_number, locator)
            })
            .await?;

        if let Some(id) = id {
            info!(creator, uri, page_number, panel = %id, "Inserted panel");
        }
        Ok(id)
    }

    /// Append an empty page and return its 1-based number.
    ///
    /// # Returns
    /// `Ok(None)` when the comic does not exist.
    pub async fn add_page(&self, creator: &str, uri: &str) -> Result<Option<usize>> {
        let page_number = self
            .modify_comic(creator, uri, &[PAGES], |comic| Ok(comic.add_page()))
            .await?;

        if let Some(page_number) = page_number {
            info!(creator, uri, page_number, "Added page");
        }
        Ok(page_number)
    }

    /// Add `username` to one of the comic's access lists.
    ///
    /// Granting an existing member is a no-op apart from the revision bump.
    ///
    /// # Returns
    /// The updated comic, or `Ok(None)` when the comic does not exist.
    pub async fn grant_access(
        &self,
        creator: &str,
        uri: &str,
        access: Access,
        username: &str,
    ) -> Result<Option<Comic>> {
        let comic = self
            .modify_comic(creator, uri, &[access.field()], |comic| {
                comic.grant(access, username);
                Ok(comic.clone())
            })
            .await?;

        if comic.is_some() {
            info!(creator, uri, %access, username, "Granted access");
        }
        Ok(comic)
    }

    /// Fetch a comic along with the guard for writing it back.
    ///
    /// Documents written by older versions carry their lookup key under
    /// `urisan` and are found through it when the current key misses.
    async fn load_comic(&self, creator: &str, canonical: &str) -> Result<Option<Snapshot>> {
        let mut key = comic_filter(creator, canonical);
        let mut found = self.store.find_one(COMICS, &key).await?;
        if found.is_none() {
            key = legacy_comic_filter(creator, canonical);
            found = self.store.find_one(COMICS, &key).await?;
        }
        let Some(document) = found else {
            debug!(creator, uri = canonical, "Comic not found");
            return Ok(None);
        };

        let record = ComicRecord::from_document(document.clone())?;
        let comic = Comic::try_from(record).map_err(|e| {
            error!(creator, uri = canonical, error = %e, "Corrupted comic record");
            e
        })?;
        Ok(Some(Snapshot::new(comic, key, &document)))
    }

    /// Run one revision-guarded read-modify-write cycle on a comic.
    ///
    /// `change` is applied to a freshly loaded comic; if it fails, nothing is
    /// written. Otherwise `fields` and the bumped revision are written back
    /// only if the stored document is unchanged, and the whole cycle is
    /// retried from a fresh read when it is not. A document found by its
    /// older key also gains `canonicalUri`.
    async fn modify_comic<T, F>(
        &self,
        creator: &str,
        uri: &str,
        fields: &[&str],
        mut change: F,
    ) -> Result<Option<T>>
    where
        F: FnMut(&mut Comic) -> Result<T> + Send,
        T: Send,
    {
        let canonical = canonical_uri(uri);
        let attempts = self.config.attempts();

        for attempt in 1..=attempts {
            let Some(mut snapshot) = self.load_comic(creator, &canonical).await? else {
                return Ok(None);
            };

            let outcome = change(&mut snapshot.comic)?;

            let next_revision = snapshot.revision.unwrap_or(0) + 1;
            let document = ComicRecord::new(&snapshot.comic, next_revision).to_document()?;
            let migrated = snapshot.legacy_key.then_some(CANONICAL_URI);
            let mut set = Document::new();
            for field in fields.iter().copied().chain([REVISION]).chain(migrated) {
                if let Some(value) = document.get(field) {
                    set.insert(field.to_string(), value.clone());
                }
            }

            if self.store.update_one(COMICS, &snapshot.guard, set).await? == 1 {
                return Ok(Some(outcome));
            }

            warn!(
                creator,
                uri = %canonical,
                attempt,
                attempts,
                "Comic changed concurrently, retrying"
            );
        }

        Err(ComicError::UpdateConflict {
            creator: creator.to_string(),
            uri: canonical,
            attempts,
        }
        .into())
    }
}
