use axum::{Json, extract::State, response::IntoResponse};
use gatehouse_application::ForgotPasswordUseCase;
use gatehouse_core::{Email, EmailClient, UserStore};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ForgotPasswordResponse {
    pub success: bool,
    pub message: String,
}

/// `POST /auth/forgotpassword`. Stores a time-boxed reset token for the
/// account and emails the plaintext token. Delivery is awaited here: if the
/// email cannot go out the client must not be told it did.
#[tracing::instrument(name = "ForgotPassword", skip_all)]
pub async fn forgot_password<U, E>(
    State((user_store, email_client)): State<(U, E)>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let Some(email) = request.email else {
        return Err(ApiError::InvalidInput(String::from("Please provide email")));
    };
    let email = Email::parse(&email)?;

    let use_case = ForgotPasswordUseCase::new(&user_store, &email_client);
    use_case.execute(email).await?;

    Ok(Json(ForgotPasswordResponse {
        success: true,
        message: String::from("Password reset email sent"),
    }))
}
