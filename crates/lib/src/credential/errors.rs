//! Error types for the credential codec
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Malformed password hash: {reason}")]
    MalformedHash { reason: String },

    #[error("Password hashing failed: {reason}")]
    HashingFailed { reason: String },

    #[error("Password verification failed: {reason}")]
    VerificationFailed { reason: String },

    #[error("Invalid hash cost: {reason}")]
    InvalidCost { reason: String },
}

impl CodecError {
    /// Check if this error was caused by a stored hash that could not be parsed.
    pub fn is_malformed_hash(&self) -> bool {
        matches!(self, CodecError::MalformedHash { .. })
    }
}

// Conversion from CodecError to the main Error type
impl From<CodecError> for crate::Error {
    fn from(err: CodecError) -> Self {
        crate::Error::Codec(err)
    }
}
