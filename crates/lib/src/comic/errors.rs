//! Error types for comic operations.

use thiserror::Error;

/// Errors that can occur while reading or changing a comic.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ComicError {
    /// Page numbers count from 1.
    #[error("Page number must be at least 1, got {page_number}")]
    InvalidPageNumber {
        /// The rejected page number
        page_number: usize,
    },

    /// The referenced page does not exist yet. Pages are never created implicitly.
    #[error("Page {page_number} does not exist (comic has {page_count} pages)")]
    PageNotFound {
        /// The requested 1-based page number
        page_number: usize,
        /// Number of pages the comic currently has
        page_count: usize,
    },

    /// A stored comic document violates the model invariants.
    #[error("Corrupted comic record {creator}/{uri}: {reason}")]
    CorruptRecord {
        creator: String,
        uri: String,
        reason: String,
    },

    /// A comic with the same canonical URI already exists for this creator.
    #[error("Comic already exists: {creator}/{uri}")]
    ComicAlreadyExists { creator: String, uri: String },

    /// Concurrent writers kept changing the comic between read and write.
    #[error("Comic {creator}/{uri} changed concurrently; gave up after {attempts} attempts")]
    UpdateConflict {
        creator: String,
        uri: String,
        attempts: u32,
    },
}

impl ComicError {
    /// Check if this error was caused by bad caller input.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            ComicError::InvalidPageNumber { .. } | ComicError::PageNotFound { .. }
        )
    }

    /// Check if this error indicates a stored comic that cannot be reconstructed.
    pub fn is_corrupt_record(&self) -> bool {
        matches!(self, ComicError::CorruptRecord { .. })
    }

    /// Check if this error indicates a conflict with existing or concurrent data.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ComicError::ComicAlreadyExists { .. } | ComicError::UpdateConflict { .. }
        )
    }
}

// Conversion from ComicError to the main Error type
impl From<ComicError> for crate::Error {
    fn from(err: ComicError) -> Self {
        crate::Error::Comic(err)
    }
}
