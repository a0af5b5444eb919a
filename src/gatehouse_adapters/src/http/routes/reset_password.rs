use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use gatehouse_application::ResetPasswordUseCase;
use gatehouse_core::{CredentialHasher, EmailClient, Password, ResetToken, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use super::error::ApiError;
use super::TokenResponse;
use crate::auth::session_tokens::SessionTokenService;
use crate::email::dispatch_in_background;

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub password: Option<Secret<String>>,
}

/// `PUT /auth/resetpassword/{resettoken}`. Consumes the emailed token, swaps
/// the password and logs the user straight in with a fresh session token.
/// Unknown and expired tokens are the same 400.
#[tracing::instrument(name = "ResetPassword", skip_all)]
pub async fn reset_password<U, H, E>(
    State((user_store, hasher, token_service, email_client)): State<(
        U,
        H,
        SessionTokenService,
        E,
    )>,
    Path(reset_token): Path<String>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    E: EmailClient + Clone + Send + Sync + 'static,
{
    let Some(password) = request.password else {
        return Err(ApiError::InvalidInput(String::from(
            "Please provide a new password",
        )));
    };
    let password = Password::parse(password)?;

    let use_case = ResetPasswordUseCase::new(&user_store, &hasher);
    let outcome = use_case
        .execute(ResetToken::presented(&reset_token), password)
        .await?;

    let token = token_service.issue(&outcome.user.id)?;
    dispatch_in_background(email_client, outcome.effects);

    Ok(Json(TokenResponse {
        success: true,
        message: String::from("Password reset successful"),
        token,
    }))
}
