//! Constants used throughout the comicstore library.
//!
//! Collection names and the document field names shared by the user and
//! comic records, the gateway filters and the store indexes.

/// Collection holding one document per user account.
pub const USERS: &str = "users";

/// Collection holding one document per comic.
pub const COMICS: &str = "comics";

/// User document: login name, unique across the collection.
pub const USERNAME: &str = "username";

/// User document: role discriminant tag.
pub const VARIANT: &str = "variant";

/// Comic document: normalized lookup key.
pub const CANONICAL_URI: &str = "canonicalUri";

/// Comic document: lookup key as written by older versions.
pub const LEGACY_CANONICAL_URI: &str = "urisan";

/// Comic document: username of the originating artist.
pub const CREATOR: &str = "creator";

/// Comic document: ordered pages of panel ids.
pub const PAGES: &str = "pages";

/// Comic document: append-only panel locator index.
pub const PANEL_MAP: &str = "panelMap";

/// Comic document: panel map as written by older versions.
pub const LEGACY_PANEL_MAP: &str = "panel_map";

/// Comic document: optimistic concurrency token.
pub const REVISION: &str = "revision";

/// Comic document: access list field names.
pub const VIEWLIST: &str = "viewlist";
pub const EDITLIST: &str = "editlist";
pub const ADMINLIST: &str = "adminlist";
