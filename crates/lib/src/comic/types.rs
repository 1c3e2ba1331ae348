//! Comic data model
//!
//! A comic is an ordered list of pages. Each page lists panel ids, and each
//! panel id indexes into the comic's panel map, which only ever grows. A
//! panel id is therefore permanent: once assigned it always names the same
//! locator, and no two panels share an id.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    errors::ComicError,
    uri::{canonical_uri, sanitize_name},
};
use crate::{
    Result,
    constants::{
        ADMINLIST, CANONICAL_URI, CREATOR, EDITLIST, LEGACY_CANONICAL_URI, LEGACY_PANEL_MAP,
        PANEL_MAP, VIEWLIST,
    },
    store::{Document, from_document, to_document},
};

/// Permanent identifier of a panel: its index in the panel map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(pub usize);

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Permission level carried by one of the three access lists
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Access {
    View,
    Edit,
    Admin,
}

impl Access {
    /// Document field holding this access list.
    pub fn field(self) -> &'static str {
        match self {
            Access::View => VIEWLIST,
            Access::Edit => EDITLIST,
            Access::Admin => ADMINLIST,
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::View => f.write_str("view"),
            Access::Edit => f.write_str("edit"),
            Access::Admin => f.write_str("admin"),
        }
    }
}

/// A comic and its page layout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comic {
    uri: String,
    canonical_uri: String,
    name: String,
    description: String,
    creator: String,
    viewlist: Vec<String>,
    editlist: Vec<String>,
    adminlist: Vec<String>,
    panel_map: Vec<String>,
    pages: Vec<Vec<PanelId>>,
}

impl Comic {
    /// Create a new, empty comic owned by `creator`.
    ///
    /// The uri is derived from `name`; the creator is the sole editor and
    /// admin, and nobody else can view it yet.
    pub fn new(
        name: impl Into<String>,
        creator: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let creator = creator.into();
        let uri = sanitize_name(&name);
        let canonical_uri = canonical_uri(&uri);

        Self {
            uri,
            canonical_uri,
            name,
            description: description.into(),
            editlist: vec![creator.clone()],
            adminlist: vec![creator.clone()],
            creator,
            viewlist: Vec::new(),
            panel_map: Vec::new(),
            pages: Vec::new(),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn canonical_uri(&self) -> &str {
        &self.canonical_uri
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn viewlist(&self) -> &[String] {
        &self.viewlist
    }

    pub fn editlist(&self) -> &[String] {
        &self.editlist
    }

    pub fn adminlist(&self) -> &[String] {
        &self.adminlist
    }

    /// Access list for the given permission level.
    pub fn access_list(&self, access: Access) -> &[String] {
        match access {
            Access::View => &self.viewlist,
            Access::Edit => &self.editlist,
            Access::Admin => &self.adminlist,
        }
    }

    pub fn panel_map(&self) -> &[String] {
        &self.panel_map
    }

    pub fn pages(&self) -> &[Vec<PanelId>] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Locator of a panel, if the id has been assigned.
    pub fn panel(&self, id: PanelId) -> Option<&str> {
        self.panel_map.get(id.0).map(String::as_str)
    }

    /// Resolve a 1-based page to the locators of its panels, in order.
    pub fn page_panels(&self, page_number: usize) -> Result<Vec<&str>> {
        let page = self.page(page_number)?;
        Ok(page.iter().filter_map(|id| self.panel(*id)).collect())
    }

    /// Append an empty page and return its 1-based number.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Vec::new());
        self.pages.len()
    }

    /// Add a new panel to the end of a page.
    ///
    /// The new panel gets the next free id. The comic is left untouched when
    /// the page number is rejected.
    pub fn insert_panel(
        &mut self,
        page_number: usize,
        locator: impl Into<String>,
    ) -> Result<PanelId> {
        let index = self.page_index(page_number)?;
        let id = PanelId(self.panel_map.len());
        let page_count = self.pages.len();

        let page = self
            .pages
            .get_mut(index)
            .ok_or(ComicError::PageNotFound {
                page_number,
                page_count,
            })?;
        page.push(id);
        self.panel_map.push(locator.into());

        Ok(id)
    }

    /// Add `username` to an access list. Returns false if it was already present.
    pub fn grant(&mut self, access: Access, username: impl Into<String>) -> bool {
        let username = username.into();
        let list = match access {
            Access::View => &mut self.viewlist,
            Access::Edit => &mut self.editlist,
            Access::Admin => &mut self.adminlist,
        };
        if list.contains(&username) {
            return false;
        }
        list.push(username);
        true
    }

    /// Admins may administer. The creator is always an admin.
    pub fn can_admin(&self, username: &str) -> bool {
        username == self.creator || self.adminlist.iter().any(|u| u == username)
    }

    /// Editors and admins may edit.
    pub fn can_edit(&self, username: &str) -> bool {
        self.can_admin(username) || self.editlist.iter().any(|u| u == username)
    }

    /// Viewers, editors and admins may view.
    pub fn can_view(&self, username: &str) -> bool {
        self.can_edit(username) || self.viewlist.iter().any(|u| u == username)
    }

    fn page(&self, page_number: usize) -> Result<&[PanelId]> {
        let index = self.page_index(page_number)?;
        self.pages
            .get(index)
            .map(Vec::as_slice)
            .ok_or_else(|| self.page_not_found(page_number))
    }

    fn page_index(&self, page_number: usize) -> Result<usize> {
        if page_number < 1 {
            return Err(ComicError::InvalidPageNumber { page_number }.into());
        }
        let index = page_number - 1;
        if index >= self.pages.len() {
            return Err(self.page_not_found(page_number));
        }
        Ok(index)
    }

    fn page_not_found(&self, page_number: usize) -> crate::Error {
        ComicError::PageNotFound {
            page_number,
            page_count: self.pages.len(),
        }
        .into()
    }
}

/// Comic document as stored in the `comics` collection
///
/// Older documents used `urisan` and `panel_map` for two of the fields and
/// carry no revision; both are still readable.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComicRecord {
    pub uri: String,
    #[serde(alias = "urisan")]
    pub canonical_uri: String,
    pub title: String,
    #[serde(default)]
    pub viewlist: Vec<String>,
    #[serde(default)]
    pub editlist: Vec<String>,
    #[serde(default)]
    pub adminlist: Vec<String>,
    pub creator: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "panel_map")]
    pub panel_map: Vec<String>,
    #[serde(default)]
    pub pages: Vec<Vec<PanelId>>,
    /// Optimistic concurrency token, bumped on every write
    #[serde(default)]
    pub revision: u64,
}

impl ComicRecord {
    /// Build the document for a comic at the given revision.
    pub fn new(comic: &Comic, revision: u64) -> Self {
        Self {
            uri: comic.uri.clone(),
            canonical_uri: comic.canonical_uri.clone(),
            title: comic.name.clone(),
            viewlist: comic.viewlist.clone(),
            editlist: comic.editlist.clone(),
            adminlist: comic.adminlist.clone(),
            creator: comic.creator.clone(),
            description: comic.description.clone(),
            panel_map: comic.panel_map.clone(),
            pages: comic.pages.clone(),
            revision,
        }
    }

    pub fn to_document(&self) -> Result<Document> {
        to_document(self)
    }

    pub fn from_document(mut document: Document) -> Result<Self> {
        // A legacy document gains the current field names on its first
        // update; the old names are then stale.
        for (current, legacy) in [
            (CANONICAL_URI, LEGACY_CANONICAL_URI),
            (PANEL_MAP, LEGACY_PANEL_MAP),
        ] {
            if document.contains_key(current) {
                document.remove(legacy);
            }
        }

        let creator = string_field(&document, CREATOR);
        let uri = string_field(&document, "uri");
        from_document(document).map_err(|e| {
            ComicError::CorruptRecord {
                creator,
                uri,
                reason: e.to_string(),
            }
            .into()
        })
    }
}

fn string_field(document: &Document, field: &str) -> String {
    document
        .get(field)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

impl TryFrom<ComicRecord> for Comic {
    type Error = ComicError;

    /// Rebuild a comic, including its panel map, refusing records whose
    /// pages point past the end of the panel map.
    fn try_from(record: ComicRecord) -> std::result::Result<Self, Self::Error> {
        let panel_count = record.panel_map.len();
        let dangling = record
            .pages
            .iter()
            .enumerate()
            .find_map(|(index, page)| {
                page.iter()
                    .find(|id| id.0 >= panel_count)
                    .map(|id| (index + 1, *id))
            });

        if let Some((page_number, id)) = dangling {
            return Err(ComicError::CorruptRecord {
                creator: record.creator,
                uri: record.uri,
                reason: format!(
                    "page {page_number} references panel {id} but the panel map has {panel_count} entries"
                ),
            });
        }

        Ok(Self {
            uri: record.uri,
            canonical_uri: record.canonical_uri,
            name: record.title,
            description: record.description,
            creator: record.creator,
            viewlist: record.viewlist,
            editlist: record.editlist,
            adminlist: record.adminlist,
            panel_map: record.panel_map,
            pages: record.pages,
        })
    }
}
