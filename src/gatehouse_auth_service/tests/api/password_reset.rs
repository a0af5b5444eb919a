use gatehouse_core::NotificationBody;
use serde_json::{Value, json};

use crate::helpers::{TestApp, spawn_app};

/// Pulls the plaintext token out of the recorded reset email.
async fn reset_token_from_mailbox(app: &TestApp) -> String {
    let sent = app.email_client.sent().await;
    sent.iter()
        .rev()
        .find_map(|n| match &n.body {
            NotificationBody::PasswordReset { token, .. } => Some(token.as_str().to_owned()),
            _ => None,
        })
        .expect("No password reset email was sent")
}

#[tokio::test]
async fn forgot_password_emails_a_reset_token() {
    let app = spawn_app().await;
    let (email, _) = app.register_user("correct horse").await;

    let response = app.post_forgot_password(&json!({"email": email})).await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("Password reset email sent", body["message"]);

    let token = reset_token_from_mailbox(&app).await;
    assert_eq!(40, token.len());
}

#[tokio::test]
async fn forgot_password_for_an_unknown_email_is_not_found() {
    let app = spawn_app().await;

    let response = app
        .post_forgot_password(&json!({"email": "nobody@example.com"}))
        .await;

    assert_eq!(404, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("No user found with that email", body["message"]);
}

#[tokio::test]
async fn reset_password_swaps_the_credential_and_logs_in() {
    let app = spawn_app().await;
    let (email, _) = app.register_user("old password").await;
    app.post_forgot_password(&json!({"email": email})).await;
    let reset_token = reset_token_from_mailbox(&app).await;

    let response = app
        .put_reset_password(&reset_token, &json!({"password": "new password"}))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("Password reset successful", body["message"]);

    // The fresh session token works immediately.
    let token = body["token"].as_str().unwrap();
    assert_eq!(200, app.get_me(Some(token)).await.status().as_u16());

    let old = app
        .post_login(&json!({"email": email, "password": "old password"}))
        .await;
    assert_eq!(401, old.status().as_u16());

    let new = app
        .post_login(&json!({"email": email, "password": "new password"}))
        .await;
    assert_eq!(200, new.status().as_u16());
}

#[tokio::test]
async fn reset_success_sends_a_confirmation_email() {
    let app = spawn_app().await;
    let (email, _) = app.register_user("old password").await;
    app.post_forgot_password(&json!({"email": email})).await;
    let reset_token = reset_token_from_mailbox(&app).await;

    app.put_reset_password(&reset_token, &json!({"password": "new password"}))
        .await;

    // Welcome, reset request, then the confirmation.
    let sent = app.wait_for_emails(3).await;
    assert!(
        sent.iter()
            .any(|n| matches!(n.body, NotificationBody::PasswordResetSuccess { .. }))
    );
}

#[tokio::test]
async fn a_reset_token_is_single_use() {
    let app = spawn_app().await;
    let (email, _) = app.register_user("old password").await;
    app.post_forgot_password(&json!({"email": email})).await;
    let reset_token = reset_token_from_mailbox(&app).await;

    let first = app
        .put_reset_password(&reset_token, &json!({"password": "new password"}))
        .await;
    assert_eq!(200, first.status().as_u16());

    let second = app
        .put_reset_password(&reset_token, &json!({"password": "another password"}))
        .await;
    assert_eq!(400, second.status().as_u16());
    let body: Value = second.json().await.unwrap();
    assert_eq!("Invalid or expired token", body["message"]);
}

#[tokio::test]
async fn a_garbage_reset_token_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .put_reset_password("deadbeef", &json!({"password": "new password"}))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("Invalid or expired token", body["message"]);
}

#[tokio::test]
async fn reset_password_requires_a_long_enough_password() {
    let app = spawn_app().await;
    let (email, _) = app.register_user("old password").await;
    app.post_forgot_password(&json!({"email": email})).await;
    let reset_token = reset_token_from_mailbox(&app).await;

    let response = app
        .put_reset_password(&reset_token, &json!({"password": "short"}))
        .await;

    assert_eq!(400, response.status().as_u16());
}
