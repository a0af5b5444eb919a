use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    display_name::DisplayName, email::Email, password::PasswordDigest, reset_token::PendingReset,
};

/// Validation failures when parsing raw input into domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Please add a valid email")]
    InvalidEmail,
    #[error("Please add a name")]
    InvalidName,
    #[error("Name cannot be more than 50 characters")]
    NameTooLong,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Please add a password")]
    PasswordRequired,
}

/// Opaque unique identifier assigned to a record at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Which transactional emails a user has opted into. Both default to on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub email_notifications: bool,
    pub login_alerts: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            login_alerts: true,
        }
    }
}

/// The default read projection of a user record.
///
/// Deliberately excludes the password hash and any pending reset state; code
/// that needs those goes through [`UserCredentials`] or the store's dedicated
/// reset operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: DisplayName,
    pub email: Email,
    pub preferences: NotificationPreferences,
    pub created_at: DateTime<Utc>,
}

/// A user record joined with its password hash, for credential checks only.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_digest: PasswordDigest,
}

/// A record about to be persisted by registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub name: DisplayName,
    pub email: Email,
    pub password_digest: PasswordDigest,
    pub preferences: NotificationPreferences,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn create(name: DisplayName, email: Email, password_digest: PasswordDigest) -> Self {
        Self {
            id: UserId::new(),
            name,
            email,
            password_digest,
            preferences: NotificationPreferences::default(),
            created_at: Utc::now(),
        }
    }

    /// The projection that comes back to the caller after a successful insert.
    pub fn as_user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            preferences: self.preferences,
            created_at: self.created_at,
        }
    }
}

/// Partial profile update: only fields that are `Some` are touched, so an
/// omitted field and an empty field can never be confused.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<DisplayName>,
    pub email: Option<Email>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// Full durable record as the in-memory store keeps it. The Postgres adapter
/// maps rows straight into its own projections instead.
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub id: UserId,
    pub name: DisplayName,
    pub email: Email,
    pub password_digest: PasswordDigest,
    pub pending_reset: Option<PendingReset>,
    pub preferences: NotificationPreferences,
    pub created_at: DateTime<Utc>,
}

impl StoredUser {
    pub fn as_user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            preferences: self.preferences,
            created_at: self.created_at,
        }
    }
}

impl From<NewUser> for StoredUser {
    fn from(new_user: NewUser) -> Self {
        Self {
            id: new_user.id,
            name: new_user.name,
            email: new_user.email,
            password_digest: new_user.password_digest,
            pending_reset: None,
            preferences: new_user.preferences,
            created_at: new_user.created_at,
        }
    }
}
