use gatehouse_core::NotificationBody;
use serde_json::{Value, json};

use crate::helpers::spawn_app;

#[tokio::test]
async fn register_creates_account_and_returns_session_token() {
    let app = spawn_app().await;

    let response = app
        .post_register(&json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "password": "correct horse",
        }))
        .await;

    assert_eq!(201, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(true, body["success"]);
    assert_eq!("User registered successfully", body["message"]);
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!("Ada Lovelace", body["user"]["name"]);
    assert_eq!("ada@example.com", body["user"]["email"]);
}

#[tokio::test]
async fn register_sends_welcome_email() {
    let app = spawn_app().await;

    app.post_register(&json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "password": "correct horse",
    }))
    .await;

    let sent = app.wait_for_emails(1).await;
    assert_eq!("ada@example.com", sent[0].recipient.as_str());
    assert!(matches!(sent[0].body, NotificationBody::Welcome { .. }));
}

#[tokio::test]
async fn register_rejects_missing_fields() {
    let app = spawn_app().await;

    let response = app
        .post_register(&json!({"email": "ada@example.com"}))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(false, body["success"]);
    assert_eq!("Please provide name, email and password", body["message"]);
}

#[tokio::test]
async fn register_rejects_malformed_email() {
    let app = spawn_app().await;

    let response = app
        .post_register(&json!({
            "name": "Ada",
            "email": "not-an-email",
            "password": "correct horse",
        }))
        .await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = spawn_app().await;

    let response = app
        .post_register(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "short",
        }))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("Password must be at least 6 characters", body["message"]);
}

#[tokio::test]
async fn duplicate_email_is_rejected_and_alerts_the_existing_account() {
    let app = spawn_app().await;
    let (email, _) = app.register_user("correct horse").await;

    let response = app
        .post_register(&json!({
            "name": "Impostor",
            "email": email,
            "password": "different pass",
        }))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("User with this email already exists", body["message"]);

    // Welcome from the first registration plus the conflict alert.
    let sent = app.wait_for_emails(2).await;
    assert!(
        sent.iter()
            .any(|n| matches!(n.body, NotificationBody::RegistrationAttemptAlert { .. }))
    );
}

#[tokio::test]
async fn email_is_normalized_on_registration() {
    let app = spawn_app().await;

    let response = app
        .post_register(&json!({
            "name": "Ada",
            "email": "  Ada@Example.COM ",
            "password": "correct horse",
        }))
        .await;

    assert_eq!(201, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("ada@example.com", body["user"]["email"]);
}
