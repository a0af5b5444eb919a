use std::time::Duration;

use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use gatehouse_adapters::{
    Argon2CredentialHasher, DEFAULT_TOKEN_TTL_SECONDS, HashMapUserStore, MockEmailClient,
    SessionTokenConfig, SessionTokenService,
};
use gatehouse_auth_service::AuthService;
use gatehouse_core::Notification;
use secrecy::Secret;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub email_client: MockEmailClient,
}

/// Spins the full service up on an ephemeral port, backed by the in-memory
/// store and the recording email client.
pub async fn spawn_app() -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind ephemeral port");
    let address = format!("http://{}", listener.local_addr().unwrap());

    let token_service = SessionTokenService::new(SessionTokenConfig {
        jwt_secret: Secret::new(String::from("test-signing-secret")),
        token_ttl_in_seconds: DEFAULT_TOKEN_TTL_SECONDS,
    });
    let email_client = MockEmailClient::new();

    let service = AuthService::new(
        HashMapUserStore::default(),
        Argon2CredentialHasher::default(),
        token_service,
        email_client.clone(),
    );

    tokio::spawn(service.run_standalone(listener, None));

    TestApp {
        address,
        client: reqwest::Client::new(),
        email_client,
    }
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}/auth{}", self.address, path)
    }

    pub async fn post_register(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/register"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_login(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/login"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_me(&self, token: Option<&str>) -> reqwest::Response {
        let mut request = self.client.get(self.url("/me"));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn put_update_details(&self, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url("/updatedetails"))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_update_password(&self, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url("/updatepassword"))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_forgot_password(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/forgotpassword"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_reset_password(&self, reset_token: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(&format!("/resetpassword/{reset_token}")))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Registers a fresh account and returns (email, session token).
    pub async fn register_user(&self, password: &str) -> (String, String) {
        let email: String = SafeEmail().fake();
        let response = self
            .post_register(&json!({
                "name": "Test User",
                "email": email,
                "password": password,
            }))
            .await;
        assert_eq!(201, response.status().as_u16());
        let body: Value = response.json().await.unwrap();
        let token = body["token"].as_str().unwrap().to_owned();
        (email, token)
    }

    /// Waits until at least `count` notifications have been recorded.
    /// Dispatch happens on background tasks, so the mailbox can lag the
    /// response by a beat.
    pub async fn wait_for_emails(&self, count: usize) -> Vec<Notification> {
        for _ in 0..100 {
            let sent = self.email_client.sent().await;
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("Timed out waiting for {count} emails");
    }
}
