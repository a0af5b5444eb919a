use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use gatehouse_core::UserStore;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::UserResponse;
use crate::auth::auth_gate::require_user;
use crate::auth::session_tokens::SessionTokenService;

#[derive(Serialize, Deserialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: UserResponse,
}

/// `GET /auth/me`. Returns the profile behind the presented bearer token.
#[tracing::instrument(name = "Me", skip_all)]
pub async fn me<U>(
    State((user_store, token_service)): State<(U, SessionTokenService)>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let user = require_user(&headers, &token_service, &user_store).await?;

    Ok(Json(MeResponse {
        success: true,
        user: (&user).into(),
    }))
}
