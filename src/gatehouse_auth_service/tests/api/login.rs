use gatehouse_core::{LoginAlertStatus, NotificationBody};
use serde_json::{Value, json};

use crate::helpers::spawn_app;

#[tokio::test]
async fn login_with_valid_credentials_returns_fresh_token() {
    let app = spawn_app().await;
    let (email, _) = app.register_user("correct horse").await;

    let response = app
        .post_login(&json!({"email": email, "password": "correct horse"}))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(true, body["success"]);
    assert_eq!("Login successful", body["message"]);
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(email, body["user"]["email"].as_str().unwrap());
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let app = spawn_app().await;
    let (email, _) = app.register_user("correct horse").await;

    let response = app
        .post_login(&json!({"email": email, "password": "wrong password"}))
        .await;

    assert_eq!(401, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("Invalid credentials", body["message"]);
}

#[tokio::test]
async fn short_wrong_password_still_reads_as_invalid_credentials() {
    let app = spawn_app().await;
    let (email, _) = app.register_user("correct horse").await;

    // Below the creation-time minimum length; verification must not apply
    // that rule, only report the mismatch.
    let response = app
        .post_login(&json!({"email": email, "password": "nope"}))
        .await;

    assert_eq!(401, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("Invalid credentials", body["message"]);
}

#[tokio::test]
async fn unknown_email_fails_with_the_same_message_as_wrong_password() {
    let app = spawn_app().await;

    let response = app
        .post_login(&json!({"email": "nobody@example.com", "password": "whatever"}))
        .await;

    assert_eq!(401, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("Invalid credentials", body["message"]);
}

#[tokio::test]
async fn login_rejects_missing_fields() {
    let app = spawn_app().await;

    let response = app.post_login(&json!({"email": "ada@example.com"})).await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("Please provide email and password", body["message"]);
}

#[tokio::test]
async fn successful_login_sends_an_alert() {
    let app = spawn_app().await;
    let (email, _) = app.register_user("correct horse").await;

    app.post_login(&json!({"email": email, "password": "correct horse"}))
        .await;

    // Welcome email first, then the login alert.
    let sent = app.wait_for_emails(2).await;
    assert!(sent.iter().any(|n| matches!(
        n.body,
        NotificationBody::LoginAlert {
            status: LoginAlertStatus::Successful,
            ..
        }
    )));
}

#[tokio::test]
async fn failed_login_sends_a_failure_alert() {
    let app = spawn_app().await;
    let (email, _) = app.register_user("correct horse").await;

    app.post_login(&json!({"email": email, "password": "wrong password"}))
        .await;

    let sent = app.wait_for_emails(2).await;
    assert!(sent.iter().any(|n| matches!(
        n.body,
        NotificationBody::LoginAlert {
            status: LoginAlertStatus::Failed,
            ..
        }
    )));
}
