use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use gatehouse_application::UpdateProfileUseCase;
use gatehouse_core::{DisplayName, Email, ProfilePatch, UserStore};
use serde::Deserialize;

use super::error::ApiError;
use super::me::MeResponse;
use crate::auth::auth_gate::require_user;
use crate::auth::session_tokens::SessionTokenService;

#[derive(Deserialize)]
pub struct UpdateDetailsRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// `PUT /auth/updatedetails`. Applies the provided fields to the
/// authenticated user's profile; omitted fields keep their values.
#[tracing::instrument(name = "UpdateDetails", skip_all)]
pub async fn update_details<U>(
    State((user_store, token_service)): State<(U, SessionTokenService)>,
    headers: HeaderMap,
    Json(request): Json<UpdateDetailsRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let user = require_user(&headers, &token_service, &user_store).await?;

    let patch = ProfilePatch {
        name: request.name.as_deref().map(DisplayName::parse).transpose()?,
        email: request.email.as_deref().map(Email::parse).transpose()?,
    };

    let use_case = UpdateProfileUseCase::new(&user_store);
    let updated = use_case.execute(user.id, patch).await?;

    Ok(Json(MeResponse {
        success: true,
        user: (&updated).into(),
    }))
}
