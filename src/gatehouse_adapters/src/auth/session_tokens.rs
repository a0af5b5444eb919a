use chrono::Utc;
use gatehouse_core::UserId;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, ser::SerializeStruct};
use thiserror::Error;

/// Signing secret and lifetime for session tokens, built once at startup.
#[derive(Clone)]
pub struct SessionTokenConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

/// Default session lifetime: 7 days.
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Token invalid")]
    TokenInvalid,
    #[error("Token expired")]
    TokenExpired,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Issues and verifies stateless signed session tokens.
///
/// A token binds a user id and an expiry under an HMAC signature; holders see
/// an opaque string. There is no revocation list: a valid signature plus an
/// unexpired timestamp is sufficient, so tokens issued before a password
/// change stay usable until they run out. Verification does no I/O.
#[derive(Clone)]
pub struct SessionTokenService {
    config: SessionTokenConfig,
}

impl SessionTokenService {
    pub fn new(config: SessionTokenConfig) -> Self {
        Self { config }
    }

    /// Produce a signed token binding `user_id` and the configured expiry.
    pub fn issue(&self, user_id: &UserId) -> Result<String, TokenAuthError> {
        let delta = chrono::Duration::try_seconds(self.config.token_ttl_in_seconds).ok_or(
            TokenAuthError::UnexpectedError("Failed to create token duration".to_string()),
        )?;

        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or(TokenAuthError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?
            .timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            exp,
        };

        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret_bytes()),
        )
        .map_err(|e| TokenAuthError::UnexpectedError(e.to_string()))
    }

    /// Check signature and expiry, then recover the bound user id.
    ///
    /// A bad signature or malformed payload is [`TokenAuthError::TokenInvalid`];
    /// a well-signed token past its expiry is [`TokenAuthError::TokenExpired`].
    pub fn verify(&self, token: &str) -> Result<UserId, TokenAuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenAuthError::TokenExpired,
            _ => TokenAuthError::TokenInvalid,
        })?;

        data.claims
            .sub
            .parse::<UserId>()
            .map_err(|_| TokenAuthError::TokenInvalid)
    }

    fn secret_bytes(&self) -> &[u8] {
        self.config.jwt_secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

impl Serialize for Claims {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Claims", 2)?;
        state.serialize_field("sub", &self.sub)?;
        state.serialize_field("exp", &self.exp)?;
        state.end()
    }
}
