use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use async_trait::async_trait;
use gatehouse_core::{CredentialHasher, CredentialHasherError, Password, PasswordDigest};
use secrecy::{ExposeSecret, Secret};

/// Argon2id credential hasher.
///
/// Hashing and verification are CPU-bound, so both run on a blocking thread
/// and never stall the request-accepting path. Each hash gets a fresh random
/// salt: two digests of the same password differ, and both verify.
#[derive(Debug, Clone, Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self
    }

    fn argon2() -> Result<Argon2<'static>, String> {
        Ok(Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
        ))
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<PasswordDigest, CredentialHasherError> {
        let current_span: tracing::Span = tracing::Span::current();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                let hasher = Self::argon2()?;
                hasher
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| PasswordDigest::new(Secret::from(h.to_string())))
                    .map_err(|e| e.to_string())
            })
        })
        .await
        .map_err(|e| CredentialHasherError::Unexpected(e.to_string()))?;

        result.map_err(CredentialHasherError::Unexpected)
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        digest: PasswordDigest,
        candidate: Password,
    ) -> Result<(), CredentialHasherError> {
        let current_span: tracing::Span = tracing::Span::current();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected: PasswordHash<'_> =
                    PasswordHash::new(digest.as_ref().expose_secret())
                        .map_err(|e| CredentialHasherError::Unexpected(e.to_string()))?;

                Self::argon2()
                    .map_err(CredentialHasherError::Unexpected)?
                    .verify_password(candidate.as_ref().expose_secret().as_bytes(), &expected)
                    .map_err(|_| CredentialHasherError::VerificationFailed)
            })
        })
        .await
        .map_err(|e| CredentialHasherError::Unexpected(e.to_string()))?;

        result
    }
}
