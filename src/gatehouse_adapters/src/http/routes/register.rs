use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gatehouse_application::{RegisterError, RegisterUseCase};
use gatehouse_core::{CredentialHasher, DisplayName, Email, EmailClient, Password, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use super::error::ApiError;
use super::SessionResponse;
use crate::auth::session_tokens::SessionTokenService;
use crate::email::dispatch_in_background;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
}

/// `POST /auth/register`. Creates the account, issues a session token and
/// queues the welcome email. A duplicate email answers 400 and may queue an
/// alert to the existing account instead.
#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<U, H, E>(
    State((user_store, hasher, token_service, email_client)): State<(
        U,
        H,
        SessionTokenService,
        E,
    )>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    E: EmailClient + Clone + Send + Sync + 'static,
{
    let (Some(name), Some(email), Some(password)) = (request.name, request.email, request.password)
    else {
        return Err(ApiError::InvalidInput(String::from(
            "Please provide name, email and password",
        )));
    };

    let name = DisplayName::parse(&name)?;
    let email = Email::parse(&email)?;
    let password = Password::parse(password)?;

    let use_case = RegisterUseCase::new(&user_store, &hasher);

    let outcome = match use_case.execute(name, email, password).await {
        Ok(outcome) => outcome,
        Err(RegisterError::EmailTaken { alert }) => {
            if let Some(alert) = alert {
                dispatch_in_background(email_client, vec![alert]);
            }
            return Err(ApiError::EmailTaken);
        }
        Err(e) => return Err(e.into()),
    };

    let token = token_service.issue(&outcome.user.id)?;
    dispatch_in_background(email_client, outcome.effects);

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            success: true,
            message: String::from("User registered successfully"),
            token,
            user: (&outcome.user).into(),
        }),
    ))
}
