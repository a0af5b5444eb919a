use gatehouse_adapters::{
    Argon2CredentialHasher, ClientUrls, Mailer, PostgresUserStore, PostmarkEmailClient,
    SessionTokenConfig, SessionTokenService, Settings,
};
use gatehouse_auth_service::{AuthService, init_tracing};
use gatehouse_core::Email;
use reqwest::Client as HttpClient;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Local development reads secrets from a .env file; absence is fine.
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(secrecy::ExposeSecret::expose_secret(&settings.postgres.url))
        .await?;

    sqlx::migrate!().run(&pg_pool).await?;

    let user_store = PostgresUserStore::new(pg_pool);
    let hasher = Argon2CredentialHasher::default();

    let token_service = SessionTokenService::new(SessionTokenConfig {
        jwt_secret: settings.auth.jwt_secret.clone(),
        token_ttl_in_seconds: settings.auth.token_ttl_in_seconds,
    });

    let http_client = HttpClient::builder()
        .timeout(settings.email_client.timeout())
        .build()?;

    let transport = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        Email::parse(&settings.email_client.sender)?,
        settings.email_client.auth_token.clone(),
        http_client,
    );
    let email_client = Mailer::new(transport, ClientUrls::new(&settings.app.client_url));

    let auth_service = AuthService::new(user_store, hasher, token_service, email_client);

    let allowed_origins = settings.allowed_origins();

    let listener = tokio::net::TcpListener::bind(&settings.app.address).await?;
    tracing::info!("Starting auth service...");

    auth_service
        .run_standalone(listener, allowed_origins)
        .await?;

    Ok(())
}
