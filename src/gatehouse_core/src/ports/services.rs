use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    notification::Notification,
    password::{Password, PasswordDigest},
};

#[derive(Debug, Error)]
pub enum CredentialHasherError {
    #[error("Incorrect password")]
    VerificationFailed,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Adaptive salted hashing of plaintext credentials.
///
/// Implementations are CPU-bound and must run off the request-accepting path;
/// the argon2 adapter does its work on a blocking thread. Verification never
/// compares plaintexts: it recomputes the hash against the stored digest.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<PasswordDigest, CredentialHasherError>;

    /// Ok(()) when `candidate` matches `digest`,
    /// [`CredentialHasherError::VerificationFailed`] otherwise.
    async fn verify(
        &self,
        digest: PasswordDigest,
        candidate: Password,
    ) -> Result<(), CredentialHasherError>;
}

#[derive(Debug, Error)]
pub enum EmailClientError {
    #[error("Failed to send email: {0}")]
    Dispatch(String),
}

/// Outbound transactional email delivery.
///
/// Callers hand over a templated [`Notification`]; rendering and transport
/// are entirely the implementation's business.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), EmailClientError>;
}
