use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gatehouse_application::{
    ChangePasswordError, ForgotPasswordError, LoginError, RegisterError, ResetPasswordError,
    UpdateProfileError,
};
use gatehouse_core::{DomainError, UserStoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::auth_gate::AuthGateError;
use crate::auth::session_tokens::TokenAuthError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

/// Edge error for the auth API. Every failure a handler can produce collapses
/// into one of these, which fixes both the status code and the message the
/// client sees.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("User with this email already exists")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Carries the gate's own message so missing and rejected tokens read
    /// differently in the body while sharing a status code.
    #[error("{0}")]
    NotAuthorized(String),

    #[error("No user found with that email")]
    UserNotFound,

    #[error("Invalid or expired token")]
    InvalidResetToken,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match self {
            ApiError::InvalidInput(_) | ApiError::EmailTaken | ApiError::InvalidResetToken => {
                StatusCode::BAD_REQUEST
            }

            ApiError::InvalidCredentials | ApiError::NotAuthorized(_) => StatusCode::UNAUTHORIZED,

            ApiError::UserNotFound => StatusCode::NOT_FOUND,

            ApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(ErrorResponse {
            success: false,
            message: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::EmailTaken => ApiError::EmailTaken,
            UserStoreError::UserNotFound => ApiError::UserNotFound,
            UserStoreError::NoMatchingResetToken => ApiError::InvalidResetToken,
            UserStoreError::Unexpected(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<TokenAuthError> for ApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::TokenInvalid | TokenAuthError::TokenExpired => {
                ApiError::NotAuthorized(
                    AuthGateError::TokenRejected(error).to_string(),
                )
            }
            TokenAuthError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<AuthGateError> for ApiError {
    fn from(error: AuthGateError) -> Self {
        match error {
            AuthGateError::MissingToken
            | AuthGateError::TokenRejected(_)
            | AuthGateError::UserNotFound => ApiError::NotAuthorized(error.to_string()),
            AuthGateError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::EmailTaken { .. } => ApiError::EmailTaken,
            RegisterError::Hasher(e) => ApiError::UnexpectedError(e.to_string()),
            RegisterError::Store(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials { .. } => ApiError::InvalidCredentials,
            LoginError::Hasher(e) => ApiError::UnexpectedError(e.to_string()),
            LoginError::Store(e) => e.into(),
        }
    }
}

impl From<ChangePasswordError> for ApiError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::InvalidCredentials => ApiError::InvalidCredentials,
            // The record vanished between the gate and the swap.
            ChangePasswordError::UserNotFound => {
                ApiError::NotAuthorized(AuthGateError::UserNotFound.to_string())
            }
            ChangePasswordError::Hasher(e) => ApiError::UnexpectedError(e.to_string()),
            ChangePasswordError::Store(e) => e.into(),
        }
    }
}

impl From<UpdateProfileError> for ApiError {
    fn from(error: UpdateProfileError) -> Self {
        match error {
            UpdateProfileError::EmailTaken => ApiError::EmailTaken,
            UpdateProfileError::UserNotFound => {
                ApiError::NotAuthorized(AuthGateError::UserNotFound.to_string())
            }
            UpdateProfileError::Store(e) => e.into(),
        }
    }
}

impl From<ForgotPasswordError> for ApiError {
    fn from(error: ForgotPasswordError) -> Self {
        match error {
            ForgotPasswordError::UserNotFound => ApiError::UserNotFound,
            ForgotPasswordError::Dispatch(e) => ApiError::UnexpectedError(e.to_string()),
            ForgotPasswordError::Store(e) => e.into(),
        }
    }
}

impl From<ResetPasswordError> for ApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::TokenInvalid => ApiError::InvalidResetToken,
            ResetPasswordError::Hasher(e) => ApiError::UnexpectedError(e.to_string()),
            ResetPasswordError::Store(e) => e.into(),
        }
    }
}
