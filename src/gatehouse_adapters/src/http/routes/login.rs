use axum::{Json, extract::State, response::IntoResponse};
use gatehouse_application::{LoginError, LoginUseCase};
use gatehouse_core::{CredentialHasher, Email, EmailClient, Password, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use super::error::ApiError;
use super::SessionResponse;
use crate::auth::session_tokens::SessionTokenService;
use crate::email::dispatch_in_background;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
}

/// `POST /auth/login`. Verifies the credential and issues a fresh session
/// token. Both success and failure may queue a login alert, depending on the
/// account's preferences; the response never waits for delivery.
#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, H, E>(
    State((user_store, hasher, token_service, email_client)): State<(
        U,
        H,
        SessionTokenService,
        E,
    )>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    E: EmailClient + Clone + Send + Sync + 'static,
{
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(ApiError::InvalidInput(String::from(
            "Please provide email and password",
        )));
    };

    let email = Email::parse(&email)?;
    // Length rules only apply when a credential is created; here any
    // non-empty candidate goes to the hash comparison.
    let password = Password::candidate(password).map_err(|_| {
        ApiError::InvalidInput(String::from("Please provide email and password"))
    })?;

    let use_case = LoginUseCase::new(&user_store, &hasher);

    let outcome = match use_case.execute(email, password).await {
        Ok(outcome) => outcome,
        Err(LoginError::InvalidCredentials { alert }) => {
            if let Some(alert) = alert {
                dispatch_in_background(email_client, vec![alert]);
            }
            return Err(ApiError::InvalidCredentials);
        }
        Err(e) => return Err(e.into()),
    };

    let token = token_service.issue(&outcome.user.id)?;
    dispatch_in_background(email_client, outcome.effects);

    Ok(Json(SessionResponse {
        success: true,
        message: String::from("Login successful"),
        token,
        user: (&outcome.user).into(),
    }))
}
