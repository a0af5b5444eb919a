use http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;

use crate::auth::session_tokens::DEFAULT_TOKEN_TTL_SECONDS;
use crate::config::constants::{env, prod};

/// Immutable process configuration, built once at startup from the
/// environment and passed by reference into the pieces that need it. There is
/// no ambient global: the signing secret, token lifetime and transport
/// credentials all travel through this struct.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub postgres: PostgresSettings,
    pub auth: AuthSettings,
    pub email_client: EmailClientSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub address: String,
    /// Base URL of the frontend, rendered into email links.
    pub client_url: String,
    /// Comma-separated list of origins allowed to make cross-origin calls.
    #[serde(default)]
    pub allowed_origins: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_in_millis)
    }
}

impl Settings {
    /// Load configuration from `GATEHOUSE__*` environment variables on top of
    /// the defaults. Secrets (postgres url, jwt secret, email auth token)
    /// have no default and must be provided.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("app.address", prod::APP_ADDRESS)?
            .set_default("app.client_url", prod::CLIENT_URL)?
            .set_default("auth.token_ttl_in_seconds", DEFAULT_TOKEN_TTL_SECONDS)?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default(
                "email_client.timeout_in_millis",
                prod::email_client::TIMEOUT_IN_MILLIS,
            )?
            .add_source(
                config::Environment::with_prefix(env::CONFIG_PREFIX)
                    .separator(env::CONFIG_SEPARATOR),
            )
            .build()?
            .try_deserialize()
    }

    pub fn allowed_origins(&self) -> Option<AllowedOrigins> {
        let raw = self.app.allowed_origins.as_deref()?;
        let origins = AllowedOrigins::parse(raw);
        (!origins.is_empty()).then_some(origins)
    }
}

/// Origins permitted by the CORS layer.
#[derive(Debug, Clone, Default)]
pub struct AllowedOrigins(Vec<HeaderValue>);

impl AllowedOrigins {
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .filter_map(|s| HeaderValue::from_str(s).ok())
                .collect(),
        )
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.contains(origin)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
