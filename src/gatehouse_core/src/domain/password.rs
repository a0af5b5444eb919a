use secrecy::{ExposeSecret, Secret};

use crate::domain::user::DomainError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// A plaintext credential as supplied by the caller.
///
/// Only ever held in memory on its way to the hasher; it is never persisted,
/// never logged and never compared directly against another plaintext.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    /// For credential creation. Enforces the minimum length.
    pub fn parse(input: Secret<String>) -> Result<Self, DomainError> {
        if input.expose_secret().chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::PasswordTooShort);
        }
        Ok(Self(input))
    }

    /// For verification against a stored digest. Length rules apply when a
    /// credential is created, not when one is checked: any non-empty
    /// candidate goes to the hasher and fails there if it does not match.
    pub fn candidate(input: Secret<String>) -> Result<Self, DomainError> {
        if input.expose_secret().is_empty() {
            return Err(DomainError::PasswordRequired);
        }
        Ok(Self(input))
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = DomainError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Password::parse(value)
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// A salted adaptive hash of a credential in PHC string format.
///
/// This is the only form in which a credential reaches storage. Two digests of
/// the same password differ because of the random salt, so equality on this
/// type is meaningless and deliberately not implemented.
#[derive(Debug, Clone)]
pub struct PasswordDigest(Secret<String>);

impl PasswordDigest {
    pub fn new(phc_string: Secret<String>) -> Self {
        Self(phc_string)
    }
}

impl AsRef<Secret<String>> for PasswordDigest {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
