//! Error types for the user system
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("Username already exists: {username}")]
    UsernameTaken { username: String },

    #[error("Corrupted user record '{username}': unknown variant '{variant}'")]
    UnknownVariant { username: String, variant: String },

    #[error("Corrupted user record: {reason}")]
    MalformedRecord { reason: String },
}

impl UserError {
    /// Check if this error indicates a stored user record that cannot be reconstructed.
    pub fn is_corrupt_record(&self) -> bool {
        matches!(
            self,
            UserError::UnknownVariant { .. } | UserError::MalformedRecord { .. }
        )
    }

    /// Check if this error indicates the username is already registered.
    pub fn is_conflict(&self) -> bool {
        matches!(self, UserError::UsernameTaken { .. })
    }
}

// Conversion from UserError to the main Error type
impl From<UserError> for crate::Error {
    fn from(err: UserError) -> Self {
        crate::Error::User(err)
    }
}
