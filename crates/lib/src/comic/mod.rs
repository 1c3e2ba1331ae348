//! Comic model
//!
//! Identifier derivation, the page/panel structure and the access lists of
//! a comic, plus the document representation stored in the `comics`
//! collection.

pub mod errors;
pub mod types;
pub mod uri;

pub use errors::ComicError;
pub use types::{Access, Comic, ComicRecord, PanelId};
pub use uri::{canonical_uri, sanitize_name};
