//! User registration, lookup and login

use tracing::{debug, error, info};

use super::Gateway;
use crate::{
    Error, Result,
    constants::{USERNAME, USERS},
    credential::{self, CodecError},
    store::{Filter, StoreError},
    user::{User, UserError, UserKind, UserRecord},
};

impl Gateway {
    /// Register a new Artist.
    ///
    /// Hashes `password` and stores one user document tagged `"artist"`.
    ///
    /// # Errors
    /// `UserError::UsernameTaken` if the username is already registered.
    pub async fn register_artist(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<User> {
        self.register(UserKind::Artist, username.into(), password.into(), email.into())
            .await
    }

    /// Register a new Viewer. Same as [`register_artist`](Self::register_artist)
    /// with the `"viewer"` tag.
    pub async fn register_viewer(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<User> {
        self.register(UserKind::Viewer, username.into(), password.into(), email.into())
            .await
    }

    async fn register(
        &self,
        kind: UserKind,
        username: String,
        password: String,
        email: String,
    ) -> Result<User> {
        let hash = self.hash_password(password).await?;
        let user = match kind {
            UserKind::Artist => User::artist(username, hash, email),
            UserKind::Viewer => User::viewer(username, hash, email),
        };

        let document = UserRecord::from(&user).to_document()?;
        match self.store.insert(USERS, document).await {
            Ok(()) => {}
            Err(Error::Store(StoreError::DuplicateKey { .. })) => {
                debug!(username = %user.username(), "Username already registered");
                return Err(UserError::UsernameTaken {
                    username: user.username().to_string(),
                }
                .into());
            }
            Err(e) => return Err(e),
        }

        info!(username = %user.username(), variant = %kind, "Registered user");
        Ok(user)
    }

    /// Look up a user by username.
    ///
    /// # Returns
    /// `Ok(None)` when no user has that name.
    ///
    /// # Errors
    /// `UserError::UnknownVariant` when the stored role tag is not recognized.
    pub async fn fetch_user(&self, username: &str) -> Result<Option<User>> {
        let filter = Filter::new().field(USERNAME, username);
        let Some(document) = self.store.find_one(USERS, &filter).await? else {
            debug!(username, "User not found");
            return Ok(None);
        };

        let record = UserRecord::from_document(document)?;
        let user = User::try_from(record).map_err(|e| {
            error!(username, error = %e, "Corrupted user record");
            e
        })?;
        Ok(Some(user))
    }

    /// Check a username and password.
    ///
    /// # Returns
    /// The user when the password matches; `Ok(None)` for an unknown user or
    /// a wrong password, which callers should not distinguish.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.fetch_user(username).await? else {
            return Ok(None);
        };

        if self
            .verify_password(password.to_string(), user.password_hash().to_string())
            .await?
        {
            Ok(Some(user))
        } else {
            debug!(username, "Password mismatch");
            Ok(None)
        }
    }

    // Argon2 is CPU bound; keep it off the async worker threads.
    async fn hash_password(&self, password: String) -> Result<String> {
        let cost = self.config.hash_cost;
        tokio::task::spawn_blocking(move || credential::compute_hash(password, &cost))
            .await
            .map_err(|e| CodecError::HashingFailed {
                reason: e.to_string(),
            })?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || credential::check_hash(password, hash))
            .await
            .map_err(|e| CodecError::VerificationFailed {
                reason: e.to_string(),
            })?
    }
}
