use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gatehouse_core::{
    Email, NewUser, PasswordDigest, PendingReset, ProfilePatch, ResetTokenDigest, StoredUser, User,
    UserCredentials, UserId, UserStore, UserStoreError,
};
use tokio::sync::RwLock;

/// In-memory user store, keyed by id with the email as a scan-checked
/// uniqueness constraint.
///
/// Mutations take the single write lock, which makes every operation atomic at
/// record granularity: concurrent identical registrations resolve to one
/// winner, and a reset token can only be consumed by whichever caller gets the
/// guard first. Used by the integration tests and for local development
/// without a database.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<UserId, StoredUser>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn credentials_of(record: &StoredUser) -> UserCredentials {
        UserCredentials {
            user: record.as_user(),
            password_digest: record.password_digest.clone(),
        }
    }
}

#[async_trait]
impl UserStore for HashMapUserStore {
    async fn insert_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == new_user.email) {
            return Err(UserStoreError::EmailTaken);
        }
        let stored = StoredUser::from(new_user);
        let user = stored.as_user();
        users.insert(stored.id, stored);
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(id)
            .map(StoredUser::as_user)
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<UserCredentials, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .map(Self::credentials_of)
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_credentials_by_id(&self, id: &UserId) -> Result<UserCredentials, UserStoreError> {
        self.users
            .read()
            .await
            .get(id)
            .map(Self::credentials_of)
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn set_password(
        &self,
        id: &UserId,
        new_digest: PasswordDigest,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let record = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        record.password_digest = new_digest;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        patch: ProfilePatch,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if let Some(email) = &patch.email {
            if users.values().any(|u| &u.email == email && &u.id != id) {
                return Err(UserStoreError::EmailTaken);
            }
        }
        let record = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        if let Some(name) = patch.name {
            record.name = name;
        }
        if let Some(email) = patch.email {
            record.email = email;
        }
        Ok(record.as_user())
    }

    async fn store_reset_token(
        &self,
        id: &UserId,
        token_digest: ResetTokenDigest,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let record = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        record.pending_reset = Some(PendingReset {
            token_digest,
            expires_at,
        });
        Ok(())
    }

    async fn consume_reset_token(
        &self,
        token_digest: &ResetTokenDigest,
        new_digest: PasswordDigest,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError> {
        // Single write guard: match, password swap and clear are one step.
        let mut users = self.users.write().await;
        let record = users
            .values_mut()
            .find(|u| {
                u.pending_reset
                    .as_ref()
                    .is_some_and(|p| &p.token_digest == token_digest && !p.is_expired(now))
            })
            .ok_or(UserStoreError::NoMatchingResetToken)?;
        record.password_digest = new_digest;
        record.pending_reset = None;
        Ok(record.as_user())
    }
}
