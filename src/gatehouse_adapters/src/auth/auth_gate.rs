use axum::http::{HeaderMap, header::AUTHORIZATION};
use gatehouse_core::{User, UserStore, UserStoreError};
use thiserror::Error;

use crate::auth::session_tokens::{SessionTokenService, TokenAuthError};

/// Why a request was turned away at the gate. All map to 401 at the edge,
/// with distinct reasons kept for logging and message selection.
#[derive(Debug, Error)]
pub enum AuthGateError {
    #[error("Not authorized to access this route. Please login.")]
    MissingToken,
    #[error("Not authorized to access this route. Token invalid or expired.")]
    TokenRejected(#[source] TokenAuthError),
    #[error("User not found. Please login again.")]
    UserNotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Request gate for protected routes.
///
/// Walks the only path from a raw request to an authenticated identity:
/// extract the bearer credential, verify the signature and expiry, then load
/// the user it references - without the password hash. Handlers receive the
/// returned [`User`] and nothing else crosses the boundary.
#[tracing::instrument(name = "AuthGate", skip_all)]
pub async fn require_user<U>(
    headers: &HeaderMap,
    tokens: &SessionTokenService,
    user_store: &U,
) -> Result<User, AuthGateError>
where
    U: UserStore,
{
    let token = extract_bearer_token(headers).ok_or(AuthGateError::MissingToken)?;

    let user_id = tokens.verify(token).map_err(AuthGateError::TokenRejected)?;

    // The account may have been deleted since the token was issued.
    match user_store.find_by_id(&user_id).await {
        Ok(user) => Ok(user),
        Err(UserStoreError::UserNotFound) => Err(AuthGateError::UserNotFound),
        Err(e) => Err(AuthGateError::UnexpectedError(e.to_string())),
    }
}

/// Pulls the credential out of a standard `Authorization: Bearer <token>`
/// header. Anything else - missing header, other scheme - is absence.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
