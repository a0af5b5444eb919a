pub mod auth;
pub mod config;
pub mod email;
pub mod http;
pub mod persistence;
pub mod security;

pub use auth::{
    auth_gate::{AuthGateError, require_user},
    session_tokens::{
        DEFAULT_TOKEN_TTL_SECONDS, SessionTokenConfig, SessionTokenService, TokenAuthError,
    },
};
pub use config::{AllowedOrigins, Settings};
pub use email::{
    ClientUrls, EmailTransport, Mailer, MockEmailClient, PostmarkEmailClient,
    dispatch_in_background,
};
pub use persistence::{HashMapUserStore, PostgresUserStore};
pub use security::Argon2CredentialHasher;
