use serde_json::{Value, json};

use crate::helpers::spawn_app;

#[tokio::test]
async fn me_returns_the_profile_behind_the_token() {
    let app = spawn_app().await;
    let (email, token) = app.register_user("correct horse").await;

    let response = app.get_me(Some(&token)).await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(true, body["success"]);
    assert_eq!(email, body["user"]["email"].as_str().unwrap());
    assert!(!body["user"]["createdAt"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn me_without_a_token_is_unauthorized() {
    let app = spawn_app().await;

    let response = app.get_me(None).await;

    assert_eq!(401, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        "Not authorized to access this route. Please login.",
        body["message"]
    );
}

#[tokio::test]
async fn me_with_a_garbled_token_is_unauthorized() {
    let app = spawn_app().await;

    let response = app.get_me(Some("definitely-not-a-jwt")).await;

    assert_eq!(401, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        "Not authorized to access this route. Token invalid or expired.",
        body["message"]
    );
}

#[tokio::test]
async fn update_details_changes_name_and_keeps_email() {
    let app = spawn_app().await;
    let (email, token) = app.register_user("correct horse").await;

    let response = app
        .put_update_details(&token, &json!({"name": "New Name"}))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("New Name", body["user"]["name"]);
    assert_eq!(email, body["user"]["email"].as_str().unwrap());
}

#[tokio::test]
async fn update_details_rejects_an_email_already_in_use() {
    let app = spawn_app().await;
    let (other_email, _) = app.register_user("correct horse").await;
    let (_, token) = app.register_user("correct horse").await;

    let response = app
        .put_update_details(&token, &json!({"email": other_email}))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("User with this email already exists", body["message"]);
}

#[tokio::test]
async fn update_details_requires_authentication() {
    let app = spawn_app().await;

    let response = app
        .put_update_details("bad-token", &json!({"name": "New Name"}))
        .await;

    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn update_password_swaps_the_credential() {
    let app = spawn_app().await;
    let (email, token) = app.register_user("old password").await;

    let response = app
        .put_update_password(
            &token,
            &json!({"currentPassword": "old password", "newPassword": "new password"}),
        )
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("Password updated successfully", body["message"]);
    assert!(!body["token"].as_str().unwrap().is_empty());

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
async fn update_password_rejects_a_wrong_current_password() {
    let app = spawn_app().await;
    let (_, token) = app.register_user("old password").await;

    let response = app
        .put_update_password(
            &token,
            &json!({"currentPassword": "not the password", "newPassword": "new password"}),
        )
        .await;

    assert_eq!(401, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("Invalid credentials", body["message"]);
}

#[tokio::test]
async fn update_password_treats_a_short_wrong_current_password_as_a_mismatch() {
    let app = spawn_app().await;
    let (_, token) = app.register_user("old password").await;

    let response = app
        .put_update_password(
            &token,
            &json!({"currentPassword": "nope", "newPassword": "new password"}),
        )
        .await;

    assert_eq!(401, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("Invalid credentials", body["message"]);
}

#[tokio::test]
async fn tokens_issued_before_a_password_change_keep_working() {
    let app = spawn_app().await;
    let (_, token) = app.register_user("old password").await;

    app.put_update_password(
        &token,
        &json!({"currentPassword": "old password", "newPassword": "new password"}),
    )
    .await;

    let response = app.get_me(Some(&token)).await;
    assert_eq!(200, response.status().as_u16());
}
