//! Document store error types.
//!
//! Errors raised by a [`DocumentStore`](super::DocumentStore) implementation.
//! The gateway passes them through unchanged and never retries them.

use thiserror::Error;

/// Errors that can occur during document store operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write would give two documents the same values for a unique index.
    #[error("Duplicate key in collection '{collection}' for unique index {fields:?}")]
    DuplicateKey {
        /// Collection the write targeted
        collection: String,
        /// Fields of the violated index
        fields: Vec<String>,
    },

    /// A value handed to the store is not a JSON object.
    #[error("Invalid document: {reason}")]
    InvalidDocument {
        /// Description of the problem
        reason: String,
    },

    /// The store could not be reached.
    #[error("Store unavailable: {reason}")]
    Unavailable {
        /// Description of the connectivity failure
        reason: String,
    },

    /// A store round trip did not complete in time.
    #[error("Store operation timed out: {operation}")]
    Timeout {
        /// The operation that timed out
        operation: String,
    },

    /// Serialization failed.
    #[error("Serialization failed")]
    SerializationFailed {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization failed.
    #[error("Deserialization failed")]
    DeserializationFailed {
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error.
    #[error("File I/O error")]
    FileIo {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Check if this error is a unique index violation.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey { .. })
    }

    /// Check if this error is related to I/O operations.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            StoreError::FileIo { .. }
                | StoreError::SerializationFailed { .. }
                | StoreError::DeserializationFailed { .. }
        )
    }

    /// Check if this error comes from connectivity or latency rather than data.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::Unavailable { .. } | StoreError::Timeout { .. }
        )
    }
}

// Conversion from StoreError to the main Error type
impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
