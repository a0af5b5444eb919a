use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use gatehouse_application::ChangePasswordUseCase;
use gatehouse_core::{CredentialHasher, Password, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use super::error::ApiError;
use super::TokenResponse;
use crate::auth::auth_gate::require_user;
use crate::auth::session_tokens::SessionTokenService;

#[derive(Deserialize)]
pub struct UpdatePasswordRequest {
    #[serde(rename = "currentPassword")]
    pub current_password: Option<Secret<String>>,
    #[serde(rename = "newPassword")]
    pub new_password: Option<Secret<String>>,
}

/// `PUT /auth/updatepassword`. Verifies the current password before swapping
/// in the new one, then issues a fresh session token. Previously issued
/// tokens stay valid until they expire.
#[tracing::instrument(name = "UpdatePassword", skip_all)]
pub async fn update_password<U, H>(
    State((user_store, hasher, token_service)): State<(U, H, SessionTokenService)>,
    headers: HeaderMap,
    Json(request): Json<UpdatePasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
{
    let user = require_user(&headers, &token_service, &user_store).await?;

    let (Some(current), Some(new)) = (request.current_password, request.new_password) else {
        return Err(ApiError::InvalidInput(String::from(
            "Please provide current and new password",
        )));
    };

    // The current password is only verified, so it skips the length rule;
    // the new one becomes the credential and keeps it.
    let current = Password::candidate(current).map_err(|_| {
        ApiError::InvalidInput(String::from("Please provide current and new password"))
    })?;
    let new = Password::parse(new)?;

    let use_case = ChangePasswordUseCase::new(&user_store, &hasher);
    use_case.execute(user.id, current, new).await?;

    let token = token_service.issue(&user.id)?;

    Ok(Json(TokenResponse {
        success: true,
        message: String::from("Password updated successfully"),
        token,
    }))
}
