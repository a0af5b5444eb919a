//! Shared mocks for use case tests. The in-memory store mirrors the contract
//! of the real adapters closely enough that the use cases cannot tell the
//! difference; the stub hasher is transparent so tests stay fast.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

use gatehouse_core::{
    CredentialHasher, CredentialHasherError, DisplayName, Email, EmailClient, EmailClientError,
    NewUser, Notification, Password, PasswordDigest, PendingReset, ProfilePatch, ResetTokenDigest,
    StoredUser, User, UserCredentials, UserId, UserStore, UserStoreError,
};

#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<UserId, StoredUser>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, name: &str, email: &str, password: &str) -> User {
        let new_user = NewUser::create(
            DisplayName::parse(name).unwrap(),
            Email::parse(email).unwrap(),
            StubHasher::digest_of(password),
        );
        self.insert_user(new_user).await.unwrap()
    }

    pub async fn pending_reset_of(&self, id: &UserId) -> Option<PendingReset> {
        self.users
            .read()
            .await
            .get(id)
            .and_then(|record| record.pending_reset.clone())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
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
            .map(|u| UserCredentials {
                user: u.as_user(),
                password_digest: u.password_digest.clone(),
            })
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_credentials_by_id(&self, id: &UserId) -> Result<UserCredentials, UserStoreError> {
        self.users
            .read()
            .await
            .get(id)
            .map(|u| UserCredentials {
                user: u.as_user(),
                password_digest: u.password_digest.clone(),
            })
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

/// Transparent "hasher": the digest is the plaintext behind a marker prefix.
#[derive(Clone, Default)]
pub struct StubHasher;

impl StubHasher {
    pub fn digest_of(plaintext: &str) -> PasswordDigest {
        PasswordDigest::new(Secret::from(format!("stub:{plaintext}")))
    }
}

#[async_trait]
impl CredentialHasher for StubHasher {
    async fn hash(&self, password: Password) -> Result<PasswordDigest, CredentialHasherError> {
        Ok(Self::digest_of(password.as_ref().expose_secret()))
    }

    async fn verify(
        &self,
        digest: PasswordDigest,
        candidate: Password,
    ) -> Result<(), CredentialHasherError> {
        let expected = format!("stub:{}", candidate.as_ref().expose_secret());
        if digest.as_ref().expose_secret() == &expected {
            Ok(())
        } else {
            Err(CredentialHasherError::VerificationFailed)
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingEmailClient {
    pub sent: Arc<RwLock<Vec<Notification>>>,
}

#[async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send(&self, notification: &Notification) -> Result<(), EmailClientError> {
        self.sent.write().await.push(notification.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct FailingEmailClient;

#[async_trait]
impl EmailClient for FailingEmailClient {
    async fn send(&self, _notification: &Notification) -> Result<(), EmailClientError> {
        Err(EmailClientError::Dispatch("smtp unreachable".to_string()))
    }
}

pub fn password(raw: &str) -> Password {
    Password::parse(Secret::from(raw.to_string())).unwrap()
}

pub fn email(raw: &str) -> Email {
    Email::parse(raw).unwrap()
}

pub fn name(raw: &str) -> DisplayName {
    DisplayName::parse(raw).unwrap()
}
