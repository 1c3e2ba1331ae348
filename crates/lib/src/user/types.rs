//! Core data types for the user system

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::UserError;
use crate::{
    Result,
    store::{Document, from_document, to_document},
};

/// Attributes shared by every user role
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    /// Unique username (login identifier), immutable after creation
    pub username: String,

    /// Password hash (PHC string from the credential codec)
    pub password_hash: String,

    /// Contact email
    pub email: String,
}

/// A registered user.
///
/// The role is fixed at creation and cannot change; there is no API to
/// turn an `Artist` into a `Viewer` or back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum User {
    /// May create and publish comics
    Artist(Account),
    /// May read comics shared with them
    Viewer(Account),
}

impl User {
    /// Construct an Artist. Does not check username uniqueness.
    pub fn artist(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        User::Artist(Account {
            username: username.into(),
            password_hash: password_hash.into(),
            email: email.into(),
        })
    }

    /// Construct a Viewer. Does not check username uniqueness.
    pub fn viewer(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        User::Viewer(Account {
            username: username.into(),
            password_hash: password_hash.into(),
            email: email.into(),
        })
    }

    fn from_parts(kind: UserKind, account: Account) -> Self {
        match kind {
            UserKind::Artist => User::Artist(account),
            UserKind::Viewer => User::Viewer(account),
        }
    }

    pub fn kind(&self) -> UserKind {
        match self {
            User::Artist(_) => UserKind::Artist,
            User::Viewer(_) => UserKind::Viewer,
        }
    }

    pub fn account(&self) -> &Account {
        match self {
            User::Artist(account) | User::Viewer(account) => account,
        }
    }

    pub fn username(&self) -> &str {
        &self.account().username
    }

    pub fn password_hash(&self) -> &str {
        &self.account().password_hash
    }

    pub fn email(&self) -> &str {
        &self.account().email
    }

    pub fn is_artist(&self) -> bool {
        matches!(self, User::Artist(_))
    }
}

/// User role discriminant, as persisted in the `variant` field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserKind {
    Artist,
    Viewer,
}

impl UserKind {
    /// Tag written to storage for this role.
    pub fn tag(self) -> &'static str {
        match self {
            UserKind::Artist => "artist",
            UserKind::Viewer => "viewer",
        }
    }

    /// Parse a stored tag. `"pleb"` is the tag older deployments wrote for viewers.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "artist" => Some(UserKind::Artist),
            "viewer" | "pleb" => Some(UserKind::Viewer),
            _ => None,
        }
    }
}

impl fmt::Display for UserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// User document as stored in the `users` collection
///
/// The variant is kept as a raw string so that an unrecognized tag reaches
/// reconstruction and is reported, rather than failing inside serde.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    #[serde(alias = "hash")]
    pub password_hash: String,
    #[serde(alias = "type")]
    pub variant: String,
    pub email: String,
}

impl UserRecord {
    pub fn to_document(&self) -> Result<Document> {
        to_document(self)
    }

    pub fn from_document(document: Document) -> Result<Self> {
        from_document(document).map_err(|e| {
            UserError::MalformedRecord {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        let account = user.account();
        Self {
            username: account.username.clone(),
            password_hash: account.password_hash.clone(),
            variant: user.kind().tag().to_string(),
            email: account.email.clone(),
        }
    }
}

impl TryFrom<UserRecord> for User {
    type Error = UserError;

    fn try_from(record: UserRecord) -> std::result::Result<Self, Self::Error> {
        let Some(kind) = UserKind::from_tag(&record.variant) else {
            return Err(UserError::UnknownVariant {
                username: record.username,
                variant: record.variant,
            });
        };

        Ok(User::from_parts(
            kind,
            Account {
                username: record.username,
                password_hash: record.password_hash,
                email: record.email,
            },
        ))
    }
}
