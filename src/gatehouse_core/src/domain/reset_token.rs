use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// How long a password-reset token stays valid after generation.
pub const RESET_TOKEN_TTL_MINUTES: i64 = 10;

pub fn reset_token_ttl() -> Duration {
    Duration::minutes(RESET_TOKEN_TTL_MINUTES)
}

const RESET_TOKEN_BYTES: usize = 20;

/// A single-use password-reset secret in plaintext form.
///
/// The plaintext exists only to be delivered out-of-band; storage only ever
/// sees its one-way digest. Consuming a presented token means digesting it
/// again and looking the digest up, so no format validation happens here.
#[derive(Debug, Clone)]
pub struct ResetToken(String);

impl ResetToken {
    /// 20 bytes of OS randomness rendered as a fixed-length hex string.
    pub fn generate() -> Self {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Wraps a token presented back by a caller (e.g. from the reset URL).
    pub fn presented(raw: &str) -> Self {
        Self(raw.to_string())
    }

    pub fn digest(&self) -> ResetTokenDigest {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        ResetTokenDigest(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// SHA-256 digest of a reset token, hex encoded. This is what storage holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetTokenDigest(String);

impl ResetTokenDigest {
    pub fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An outstanding reset on a user record.
///
/// The digest and the expiry travel together so a record can never hold one
/// without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReset {
    pub token_digest: ResetTokenDigest,
    pub expires_at: DateTime<Utc>,
}

impl PendingReset {
    pub fn starting_now(token: &ResetToken) -> Self {
        Self {
            token_digest: token.digest(),
            expires_at: Utc::now() + reset_token_ttl(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
