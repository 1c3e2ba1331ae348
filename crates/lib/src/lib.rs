//!
//! comicstore: persistence and domain model for a small comic publishing service.
//!
//! ## Core Concepts
//!
//! * **Users (`user::User`)**: Accounts in one of two fixed roles, Artist or Viewer.
//!   The role is persisted as a discriminant tag and restored exactly on read.
//! * **Comics (`comic::Comic`)**: An ordered list of pages, each page an ordered list of
//!   panel ids pointing into an append-only panel map, plus view/edit/admin access lists.
//! * **Credentials (`credential`)**: Salted, tunable-cost password hashing.
//! * **Document stores (`store::DocumentStore`)**: A pluggable key/value-document backend
//!   exposing insert, find-one and conditional update.
//! * **Gateway (`gateway::Gateway`)**: The async operations that translate between the
//!   in-memory entities and their stored documents, keeping pages and the panel map
//!   consistent across concurrent writers.

pub mod comic;
pub mod config;
pub mod constants;
pub mod credential;
pub mod gateway;
pub mod store;
pub mod user;

pub use comic::{Access, Comic, PanelId};
pub use config::GatewayConfig;
pub use gateway::Gateway;
pub use user::{User, UserKind};

/// Result type used throughout the comicstore library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the comicstore library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured password hashing errors from the credential module
    #[error(transparent)]
    Codec(credential::CodecError),

    /// Structured user errors from the user module
    #[error(transparent)]
    User(user::UserError),

    /// Structured comic errors from the comic module
    #[error(transparent)]
    Comic(comic::ComicError),

    /// Structured document store errors from the store module
    #[error(transparent)]
    Store(store::StoreError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Codec(_) => "credential",
            Error::User(_) => "user",
            Error::Comic(_) => "comic",
            Error::Store(_) => "store",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error was caused by bad caller input.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::Comic(comic_err) => comic_err.is_validation_error(),
            _ => false,
        }
    }

    /// Check if this error indicates a stored record that cannot be reconstructed.
    pub fn is_corrupt_record(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_corrupt_record(),
            Error::Comic(comic_err) => comic_err.is_corrupt_record(),
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (already exists, or lost a write race).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_conflict(),
            Error::Comic(comic_err) => comic_err.is_conflict(),
            Error::Store(store_err) => store_err.is_duplicate_key(),
            _ => false,
        }
    }

    /// Check if this error came from the underlying document store.
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// Check if this error came from password hashing or verification.
    pub fn is_codec_error(&self) -> bool {
        matches!(self, Error::Codec(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Store(store_err) => store_err.is_io_error(),
            _ => false,
        }
    }
}
