use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::PasswordDigest,
    reset_token::ResetTokenDigest,
    user::{NewUser, ProfilePatch, User, UserCredentials, UserId},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User with this email already exists")]
    EmailTaken,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid or expired token")]
    NoMatchingResetToken,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EmailTaken, Self::EmailTaken) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::NoMatchingResetToken, Self::NoMatchingResetToken) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// Durable user storage with a uniqueness constraint on the normalized email.
///
/// Every mutation is atomic at the granularity of one record. In particular
/// the store, not the caller, is the final arbiter of registration races
/// (`insert_user` surfaces the constraint violation as [`UserStoreError::EmailTaken`])
/// and of concurrent reset consumes (`consume_reset_token` swaps the password
/// and clears the pending reset in one step, so a token can win at most once).
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new record. Loses to the email uniqueness constraint with
    /// [`UserStoreError::EmailTaken`].
    async fn insert_user(&self, new_user: NewUser) -> Result<User, UserStoreError>;

    /// Default projection by id: never includes the password hash.
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError>;

    /// Record plus password hash, for credential verification by email.
    async fn find_credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<UserCredentials, UserStoreError>;

    /// Record plus password hash, for credential verification by id.
    async fn find_credentials_by_id(&self, id: &UserId) -> Result<UserCredentials, UserStoreError>;

    /// Overwrite the password hash. Does not touch any pending reset.
    async fn set_password(
        &self,
        id: &UserId,
        new_digest: PasswordDigest,
    ) -> Result<(), UserStoreError>;

    /// Apply a partial profile update; omitted fields keep their values.
    /// An email change re-hits the uniqueness constraint.
    async fn update_profile(&self, id: &UserId, patch: ProfilePatch)
    -> Result<User, UserStoreError>;

    /// Attach a reset digest and absolute expiry to the record, replacing any
    /// previous outstanding reset.
    async fn store_reset_token(
        &self,
        id: &UserId,
        token_digest: ResetTokenDigest,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserStoreError>;

    /// Atomically find the record whose pending reset matches `token_digest`
    /// and is unexpired at `now`, write `new_digest` as its password hash and
    /// clear the pending reset. No-match and expired are indistinguishable:
    /// both are [`UserStoreError::NoMatchingResetToken`].
    async fn consume_reset_token(
        &self,
        token_digest: &ResetTokenDigest,
        new_digest: PasswordDigest,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError>;
}
